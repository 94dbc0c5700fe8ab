//! Video identifier extraction from the player bootstrap script.
//!
//! The page embeds the stream id inside an inline `<script>` that creates the
//! player. Among all scripts containing the marker the last one wins, and
//! within it the last pattern match wins. Whether "last" is deliberate upstream
//! (e.g. a placeholder script earlier in the page) is unknown; it is kept as is.

use crate::config::ExtractConfig;
use crate::error::{GrabError, GrabResult, NotFoundReason};
use regex::Regex;
use scraper::{ElementRef, Html};

/// Compiled marker + identifier pattern.
#[derive(Debug, Clone)]
pub struct IdentifierExtractor {
    marker: String,
    pattern: Regex,
}

impl IdentifierExtractor {
    pub fn new(cfg: &ExtractConfig) -> GrabResult<Self> {
        let pattern = Regex::new(&format!("(?m){}", cfg.identifier_pattern))?;
        Ok(Self {
            marker: cfg.marker.clone(),
            pattern,
        })
    }

    /// Returns the identifier digits from the last marked script.
    pub fn extract(&self, html: &str) -> GrabResult<String> {
        let document = Html::parse_document(html);
        let script = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "script")
            .map(|el| el.html())
            .filter(|serialized| serialized.contains(&self.marker))
            .last()
            .ok_or_else(|| {
                GrabError::IdentifierNotFound(NotFoundReason::NoMarkedScript {
                    marker: self.marker.clone(),
                })
            })?;

        let id = self
            .pattern
            .captures_iter(&script)
            .last()
            .and_then(|caps| caps.get(1).or_else(|| caps.get(0)))
            .map(|m| m.as_str().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(GrabError::IdentifierNotFound(
                NotFoundReason::NoIdentifierMatch,
            ))?;

        tracing::info!(video_id = %id, "found video identifier");
        Ok(id)
    }
}

/// Extract with the default marker and pattern.
pub fn extract_video_id(html: &str) -> GrabResult<String> {
    IdentifierExtractor::new(&ExtractConfig::default())?.extract(html)
}
