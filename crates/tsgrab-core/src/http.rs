//! Blocking HTTP GET via libcurl's easy interface.
//!
//! Every request carries the same fixed header set. Bodies of error responses
//! (status >= 400) are never delivered to the caller's sink.

use crate::config::GrabConfig;
use crate::error::{GrabError, Stage};
use std::fmt;
use std::io;
use std::time::Duration;

/// Failure of a single GET, before it is attributed to a pipeline stage.
#[derive(Debug)]
pub enum HttpError {
    /// Server answered with status >= 400.
    Status(u32),
    /// Curl reported an error (resolve, connect, TLS, read, ...).
    Curl(curl::Error),
    /// The body sink refused a chunk (e.g. disk full). Transfer was aborted.
    Sink(io::Error),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Status(code) => write!(f, "HTTP {}", code),
            HttpError::Curl(e) => write!(f, "{}", e),
            HttpError::Sink(e) => write!(f, "sink: {}", e),
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HttpError::Curl(e) => Some(e),
            HttpError::Sink(e) => Some(e),
            HttpError::Status(_) => None,
        }
    }
}

impl From<curl::Error> for HttpError {
    fn from(e: curl::Error) -> Self {
        HttpError::Curl(e)
    }
}

impl HttpError {
    /// Attribute a page or manifest request failure to its stage.
    pub fn at_stage(self, stage: Stage, url: &str) -> GrabError {
        match self {
            HttpError::Status(status) => GrabError::FetchFailed {
                stage,
                url: url.to_string(),
                status,
            },
            HttpError::Curl(source) => GrabError::Transport {
                stage,
                url: url.to_string(),
                source,
            },
            HttpError::Sink(source) => GrabError::io(format!("{} body from {}", stage, url), source),
        }
    }
}

/// GET client with the spoofed header set and a fixed receive buffer size.
#[derive(Debug, Clone)]
pub struct HttpClient {
    headers: Vec<String>,
    buffer_size: usize,
    connect_timeout: Option<Duration>,
}

impl HttpClient {
    pub fn new(headers: Vec<String>, buffer_size: usize) -> Self {
        Self {
            headers,
            buffer_size,
            connect_timeout: None,
        }
    }

    pub fn from_config(cfg: &GrabConfig) -> Self {
        Self::new(cfg.headers.to_lines(), cfg.chunk_size)
            .with_connect_timeout(cfg.connect_timeout_secs.map(Duration::from_secs))
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// GET `url` and return the body decoded as UTF-8 (lossy).
    pub fn get_text(&self, url: &str) -> Result<String, HttpError> {
        let mut body = Vec::new();
        self.get_streaming(url, |chunk| {
            body.extend_from_slice(chunk);
            Ok(())
        })?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// GET `url`, passing each non-empty body chunk (at most `buffer_size`
    /// bytes) to `sink` in arrival order. Returns the number of body bytes.
    ///
    /// Follows redirects. Runs in the current thread with no overall timeout.
    pub fn get_streaming<F>(&self, url: &str, mut sink: F) -> Result<u64, HttpError>
    where
        F: FnMut(&[u8]) -> io::Result<()>,
    {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        // Turn status >= 400 into a transfer error so no error body reaches the sink.
        easy.fail_on_error(true)?;
        easy.buffer_size(self.buffer_size)?;
        if let Some(timeout) = self.connect_timeout {
            easy.connect_timeout(timeout)?;
        }

        let mut list = curl::easy::List::new();
        for header in &self.headers {
            list.append(header)?;
        }
        easy.http_headers(list)?;

        tracing::debug!(url = %url, "GET");

        let mut received: u64 = 0;
        let mut sink_error: Option<io::Error> = None;
        let outcome = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if data.is_empty() {
                    return Ok(0);
                }
                match sink(data) {
                    Ok(()) => {
                        received += data.len() as u64;
                        Ok(data.len())
                    }
                    Err(e) => {
                        tracing::warn!("body sink failed for {}: {}", url, e);
                        sink_error = Some(e);
                        Ok(0) // abort transfer
                    }
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = sink_error {
            return Err(HttpError::Sink(e));
        }
        match outcome {
            Ok(()) => {}
            Err(e) if e.is_http_returned_error() => {
                let code = easy.response_code()?;
                return Err(HttpError::Status(code));
            }
            Err(e) => return Err(HttpError::Curl(e)),
        }

        let code = easy.response_code()?;
        if code >= 400 {
            return Err(HttpError::Status(code));
        }
        tracing::debug!(url = %url, status = code, bytes = received, "GET done");
        Ok(received)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderConfig;

    #[test]
    fn from_config_carries_header_lines() {
        let cfg = GrabConfig::default();
        let client = HttpClient::from_config(&cfg);
        assert_eq!(client.headers(), HeaderConfig::default().to_lines().as_slice());
    }

    #[test]
    fn status_maps_to_fetch_failed() {
        let e = HttpError::Status(403).at_stage(Stage::Page, "http://h/");
        match e {
            GrabError::FetchFailed { stage, url, status } => {
                assert_eq!(stage, Stage::Page);
                assert_eq!(url, "http://h/");
                assert_eq!(status, 403);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn display_status() {
        assert_eq!(HttpError::Status(500).to_string(), "HTTP 500");
    }
}
