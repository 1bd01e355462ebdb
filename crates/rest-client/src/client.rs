//! Retrying client for public endpoints.

use common::ExponentialBackoff;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::error::RestError;
use crate::transport::{HttpTransport, PublicTransport};

/// Attempts made before a query is reported as exhausted.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// How failed transport attempts are retried.
///
/// The default retries immediately, with no delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Delay schedule between attempts. `None` retries immediately.
    pub backoff: Option<ExponentialBackoff>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: None,
        }
    }
}

impl RetryPolicy {
    /// Immediate retries with the given budget.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: None,
        }
    }

    /// Builder method to wait between attempts.
    pub fn with_backoff(mut self, backoff: ExponentialBackoff) -> Self {
        self.backoff = Some(backoff);
        self
    }
}

/// Client for unauthenticated venue endpoints.
///
/// Transport failures are retried per the [`RetryPolicy`]; any HTTP status
/// counts as a reply. The retry loop holds no lock, so one client can be
/// shared by every task of a process.
#[derive(Clone)]
pub struct PublicClient {
    transport: Arc<dyn PublicTransport>,
    retry: RetryPolicy,
}

impl PublicClient {
    pub fn new(transport: Arc<dyn PublicTransport>, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    /// Client over a fresh [`HttpTransport`] with the default policy.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn http() -> Result<Self, RestError> {
        Self::http_with_retry(RetryPolicy::default())
    }

    pub fn http_with_retry(retry: RetryPolicy) -> Result<Self, RestError> {
        Ok(Self::new(Arc::new(HttpTransport::new()?), retry))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// GET `url` and return the raw body.
    ///
    /// # Errors
    /// Returns `RestError::NetworkExhausted` carrying the last transport error
    /// once every attempt has failed.
    pub async fn query(&self, url: &str) -> Result<String, RestError> {
        let attempts = self.retry.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 0..attempts {
            match self.transport.get(url).await {
                Ok(body) => {
                    if attempt > 0 {
                        tracing::debug!(url = %url, attempt = attempt + 1, "Public query recovered");
                    }
                    return Ok(body);
                }
                Err(e) => {
                    tracing::warn!(
                        url = %url,
                        attempt = attempt + 1,
                        max_attempts = attempts,
                        error = %e,
                        "Could not get reply"
                    );
                    last_error = e.to_string();

                    if let Some(backoff) = self.retry.backoff {
                        if attempt + 1 < attempts {
                            tokio::time::sleep(backoff.delay_for(attempt)).await;
                        }
                    }
                }
            }
        }

        Err(RestError::NetworkExhausted {
            attempts,
            last_error,
        })
    }

    /// GET `url` and deserialize the JSON body.
    ///
    /// Parse failures are returned as `RestError::Parse` without retrying.
    pub async fn query_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RestError> {
        let body = self.query(url).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Failed to parse response");
            RestError::Parse(e.to_string())
        })
    }
}

impl std::fmt::Debug for PublicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicClient")
            .field("retry", &self.retry)
            .finish()
    }
}
