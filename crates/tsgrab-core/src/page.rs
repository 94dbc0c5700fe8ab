//! Source page fetch.

use crate::error::{GrabResult, Stage};
use crate::http::HttpClient;

/// GET the page at `url` and return its body text. No validation of `url`
/// beyond what curl enforces.
pub fn fetch_page(client: &HttpClient, url: &str) -> GrabResult<String> {
    let body = client
        .get_text(url)
        .map_err(|e| e.at_stage(Stage::Page, url))?;
    tracing::info!(url = %url, bytes = body.len(), "fetched source page");
    Ok(body)
}
