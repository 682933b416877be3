//! Errors raised while talking to the remote email service.

use thiserror::Error;

/// Result type for remote API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while calling the remote email service.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The service answered with a non-2xx status.
    #[error("API request failed: {status} {status_text} - {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request could not complete (DNS, connection, timeout).
    #[error("API request failed: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("Failed to decode API response: {0}")]
    Decode(String),

    /// A request URL could not be built from the base URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The client could not be configured.
    #[error("Client configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Create a non-2xx status error.
    pub fn status(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status code, when the service answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::transport("Request timed out")
        } else if e.is_connect() {
            Self::transport(format!("Connection failed: {e}"))
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::transport(e.to_string())
        }
    }
}
