//! REST client error types.

use thiserror::Error;

/// Errors that can occur during public API calls.
#[derive(Debug, Error)]
pub enum RestError {
    /// Request timed out.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Connection error (network issue).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Every attempt failed at the transport level.
    #[error("Could not get reply after {attempts} attempts: {last_error}")]
    NetworkExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Message of the last transport failure.
        last_error: String,
    },

    /// Failed to parse response body as JSON.
    #[error("JSON parse error: {0}")]
    Parse(String),

    /// Failed to build the HTTP client or request.
    #[error("Request build error: {0}")]
    RequestBuild(String),
}

impl RestError {
    /// Check if this error is a transport failure worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RestError::Timeout(_) | RestError::Connection(_) | RestError::NetworkExhausted { .. }
        )
    }

    /// Check if the retry budget was spent.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RestError::NetworkExhausted { .. })
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout(err.to_string())
        } else if err.is_builder() {
            RestError::RequestBuild(err.to_string())
        } else {
            RestError::Connection(err.to_string())
        }
    }
}
