use thiserror::Error;

/// Errors raised while parsing domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid asset symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("invalid trading pair: {0:?}")]
    InvalidPair(String),
}
