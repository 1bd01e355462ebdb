//! Public (unauthenticated) HTTP queries with bounded retry.
//!
//! This crate provides:
//!
//! - [`PublicTransport`]: the seam a single request attempt goes through
//! - [`HttpTransport`]: the `reqwest` implementation, shared across calls
//! - [`PublicClient`]: retries transport failures up to [`RetryPolicy::max_attempts`]
//!   and fails with [`RestError::NetworkExhausted`] when the budget is spent
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::PublicClient;
//!
//! let client = PublicClient::http()?;
//! let body = client.query("https://poloniex.com/public?command=returnTicker").await?;
//! ```

mod client;
mod error;
mod transport;

pub use client::{PublicClient, RetryPolicy, DEFAULT_MAX_ATTEMPTS};
pub use error::RestError;
pub use transport::{HttpTransport, PublicTransport, CONNECT_TIMEOUT, REQUEST_TIMEOUT, USER_AGENT};
