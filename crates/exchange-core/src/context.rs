//! Process-wide state shared by every exchange instance.

use std::sync::Arc;

use auth::NonceRegistry;
use rest_client::PublicClient;

use crate::config::ExchangeConfig;
use crate::error::ExchangeError;
use crate::pair_filter::AverageRateSource;

/// Configuration, nonce state, price reference and public query client.
///
/// Built once per process and handed to each [`ExchangeCore`](crate::ExchangeCore)
/// behind an `Arc`.
pub struct ExchangeContext {
    config: ExchangeConfig,
    nonces: NonceRegistry,
    rates: Arc<dyn AverageRateSource>,
    public: PublicClient,
}

impl ExchangeContext {
    /// Context with an HTTP public client using `config.retry`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        config: ExchangeConfig,
        rates: Arc<dyn AverageRateSource>,
    ) -> Result<Self, ExchangeError> {
        let public = PublicClient::http_with_retry(config.retry)?;
        Ok(Self::with_parts(config, NonceRegistry::new(), rates, public))
    }

    pub fn with_parts(
        config: ExchangeConfig,
        nonces: NonceRegistry,
        rates: Arc<dyn AverageRateSource>,
        public: PublicClient,
    ) -> Self {
        Self {
            config,
            nonces,
            rates,
            public,
        }
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    pub fn nonces(&self) -> &NonceRegistry {
        &self.nonces
    }

    pub fn rates(&self) -> &dyn AverageRateSource {
        self.rates.as_ref()
    }

    pub fn public_client(&self) -> &PublicClient {
        &self.public
    }
}

impl std::fmt::Debug for ExchangeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeContext")
            .field("config", &self.config)
            .field("nonces", &self.nonces)
            .field("public", &self.public)
            .finish()
    }
}
