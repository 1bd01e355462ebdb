//! Exchange error types.

use auth::AuthError;
use model::ModelError;
use rest_client::RestError;
use thiserror::Error;

/// Errors surfaced by exchange operations.
///
/// Only `InvalidCredentials` (at construction) and an exhausted public query
/// are raised by the shared core; missing reference data and corrupt order
/// books degrade to `None` instead.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// API key or secret was not supplied. The instance must not be used.
    #[error("invalid API key or secret")]
    InvalidCredentials,

    /// Other credential problems (e.g. missing environment variables).
    #[error("authentication error: {0}")]
    Auth(AuthError),

    /// REST client error, including an exhausted retry budget.
    #[error("REST client error: {0}")]
    Rest(#[from] RestError),

    /// A venue returned a value that is not a valid symbol or pair.
    #[error("invalid market data: {0}")]
    Model(#[from] ModelError),

    /// Order parameters rejected before reaching the venue.
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    /// Error reported by the venue itself.
    #[error("{exchange} error: {message}")]
    Venue {
        /// Display name of the venue.
        exchange: String,
        /// Error message returned by the venue.
        message: String,
    },
}

impl From<AuthError> for ExchangeError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            other => Self::Auth(other),
        }
    }
}

impl ExchangeError {
    /// Check if the operation may succeed when retried by the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Rest(rest_err) => rest_err.is_retryable(),
            _ => false,
        }
    }

    /// Check if a public query ran out of attempts.
    pub fn is_network_exhausted(&self) -> bool {
        matches!(self, Self::Rest(rest_err) if rest_err.is_exhausted())
    }
}
