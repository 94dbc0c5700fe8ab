//! Fragment listing from the stream's M3U8 manifest.
//!
//! Only `#`-prefixed lines (tags and comments) are dropped. Every other line,
//! blank ones included, is an opaque fragment name and keeps its position.
//! Lines end at `\n`, `\r\n` or a lone `\r`.

use crate::error::{GrabResult, Stage};
use crate::http::HttpClient;
use crate::url_template::UrlTemplate;

/// Lazily yields fragment names from manifest text, in manifest order.
pub fn fragment_names(manifest: &str) -> impl Iterator<Item = &str> + '_ {
    split_lines(manifest).filter(|line| !line.starts_with('#'))
}

/// Splits on `\n`, `\r\n` and lone `\r`. A trailing terminator does not
/// produce an extra empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c| c == '\r' || c == '\n') {
            Some(i) => {
                let line = &rest[..i];
                let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Fetch the manifest for `video_id` and return its fragment names in order.
///
/// An empty body or one made only of `#` lines is valid and yields no
/// fragments.
pub fn list_fragments(
    client: &HttpClient,
    template: &UrlTemplate,
    video_id: &str,
) -> GrabResult<Vec<String>> {
    let url = template.manifest_url(video_id);
    tracing::info!(video_id = %video_id, url = %url, "detecting fragments");
    let body = client
        .get_text(&url)
        .map_err(|e| e.at_stage(Stage::Manifest, &url))?;
    let fragments: Vec<String> = fragment_names(&body).map(str::to_string).collect();
    tracing::debug!(count = fragments.len(), "manifest parsed");
    Ok(fragments)
}
