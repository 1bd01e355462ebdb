//! Shared utilities used across the exchange workspace.

mod backoff;
mod logging;

pub use backoff::ExponentialBackoff;
pub use logging::{init_logging, DEFAULT_LOG_FILTER};
