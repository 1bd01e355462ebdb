//! Single-attempt transport for public endpoints.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::RestError;

/// Connection-establishment timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Total per-call timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// User agent sent with every public request.
pub const USER_AGENT: &str = concat!("exchange-core/", env!("CARGO_PKG_VERSION"));

/// One delivery attempt of a public GET request.
///
/// Implementations return the raw body for any HTTP status; only failures to
/// obtain a reply at all are errors.
#[async_trait]
pub trait PublicTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<String, RestError>;
}

/// `reqwest`-backed transport.
///
/// The inner client pools connections and is safe to share between tasks.
/// Certificate validation is disabled on this public channel.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, RestError> {
        Self::with_timeouts(CONNECT_TIMEOUT, REQUEST_TIMEOUT)
    }

    pub fn with_timeouts(connect_timeout: Duration, timeout: Duration) -> Result<Self, RestError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PublicTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, RestError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Non-success status on public query");
        }

        Ok(body)
    }
}
