//! Pipeline error kinds. The first error aborts the run; nothing is retried.

use std::fmt;

/// Which request of the pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Page,
    Manifest,
    Fragment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Page => write!(f, "page"),
            Stage::Manifest => write!(f, "manifest"),
            Stage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Why no video identifier could be recovered from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundReason {
    /// No `<script>` element contains the marker.
    NoMarkedScript { marker: String },
    /// The last marked script has no identifier match.
    NoIdentifierMatch,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::NoMarkedScript { marker } => {
                write!(f, "no <script> element contains {:?}", marker)
            }
            NotFoundReason::NoIdentifierMatch => {
                write!(f, "player script has no Source identifier")
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GrabError {
    #[error("{stage} request to {url} returned HTTP {status}")]
    FetchFailed {
        stage: Stage,
        url: String,
        status: u32,
    },

    #[error("{stage} request to {url} failed")]
    Transport {
        stage: Stage,
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("video identifier not found: {0}")]
    IdentifierNotFound(NotFoundReason),

    #[error("invalid identifier pattern")]
    Pattern(#[from] regex::Error),

    #[error("fragment {fragment} returned HTTP {status}")]
    FragmentFetchFailed { fragment: String, status: u32 },

    #[error("fragment {fragment} transfer failed")]
    FragmentTransport {
        fragment: String,
        #[source]
        source: curl::Error,
    },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type GrabResult<T> = Result<T, GrabError>;

impl GrabError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        GrabError::Io {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_stage_and_status() {
        let e = GrabError::FetchFailed {
            stage: Stage::Manifest,
            url: "http://h/1/prog_index.m3u8".to_string(),
            status: 404,
        };
        assert_eq!(
            e.to_string(),
            "manifest request to http://h/1/prog_index.m3u8 returned HTTP 404"
        );

        let e = GrabError::FragmentFetchFailed {
            fragment: "seg1.ts".to_string(),
            status: 500,
        };
        assert_eq!(e.to_string(), "fragment seg1.ts returned HTTP 500");
    }

    #[test]
    fn identifier_not_found_messages() {
        let e = GrabError::IdentifierNotFound(NotFoundReason::NoMarkedScript {
            marker: "Create(config)".to_string(),
        });
        assert!(e.to_string().contains("no <script> element contains"));
        assert!(e.to_string().contains("Create(config)"));

        let e = GrabError::IdentifierNotFound(NotFoundReason::NoIdentifierMatch);
        assert_eq!(
            e.to_string(),
            "video identifier not found: player script has no Source identifier"
        );
    }
}
