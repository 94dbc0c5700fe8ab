//! Literal placeholder substitution for manifest and fragment URLs.

pub const VIDEO_ID: &str = "{VIDEO_ID}";
pub const FRAGMENT_ID: &str = "{FRAGMENT_ID}";

/// A URL with `{VIDEO_ID}` / `{FRAGMENT_ID}` placeholders.
///
/// Substitution is plain string replacement: no escaping, no validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn new(template: &str) -> Self {
        Self(template.to_string())
    }

    /// Manifest URL for `video_id`.
    pub fn manifest_url(&self, video_id: &str) -> String {
        self.0.replace(VIDEO_ID, video_id)
    }

    /// Fragment URL for `fragment` of `video_id`.
    ///
    /// The identifier is substituted first, so a fragment name containing
    /// `{VIDEO_ID}` is left untouched.
    pub fn fragment_url(&self, video_id: &str, fragment: &str) -> String {
        self.0
            .replace(VIDEO_ID, video_id)
            .replace(FRAGMENT_ID, fragment)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
