//! Fetch error types.

use thiserror::Error;

/// Errors that can occur while talking to a remote JSON API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be built or sent.
    #[error("Request to {url} failed: {message}")]
    RequestError { url: String, message: String },

    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        status: u16,
        url: String,
        message: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to parse response from {url}: {message}")]
    ParseError { url: String, message: String },

    /// No response arrived within the configured timeout.
    #[error("Request to {0} timed out")]
    Timeout(String),
}

impl FetchError {
    /// HTTP status code, if the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the remote resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
