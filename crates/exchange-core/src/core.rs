//! Shared policy object embedded by every venue implementation.

use std::sync::Arc;

use auth::{ApiCredentials, RequestSigner, SignatureDigest};
use model::{AssetSymbol, ExchangeIdentity, TradingPair, Wallets};
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::Instrument;

use crate::context::ExchangeContext;
use crate::error::ExchangeError;
use crate::market_data::MarketData;
use crate::pair_filter;

/// State and policy common to all venues.
///
/// Holds the venue's identity and credentials plus three snapshots that are
/// replaced wholesale, never edited in place: the market data, the tradeable
/// pairs derived from it, and the wallet balances. Readers get an `Arc` to
/// the current snapshot and never observe a partial update.
pub struct ExchangeCore {
    identity: ExchangeIdentity,
    credentials: ApiCredentials,
    digest: SignatureDigest,
    context: Arc<ExchangeContext>,
    market: RwLock<Arc<MarketData>>,
    tradeable_pairs: RwLock<Arc<Vec<TradingPair>>>,
    wallets: RwLock<Arc<Wallets>>,
    /// Serializes market data refreshes so the tradeable set always matches
    /// the latest published market data.
    refresh: Mutex<()>,
}

impl ExchangeCore {
    /// Create the core for one venue instance.
    ///
    /// No network call is made.
    ///
    /// # Errors
    /// Returns `ExchangeError::InvalidCredentials` if the key or secret is `None`.
    pub fn new(
        identity: ExchangeIdentity,
        api_key: Option<String>,
        api_secret: Option<String>,
        context: Arc<ExchangeContext>,
    ) -> Result<Self, ExchangeError> {
        let credentials = ApiCredentials::from_parts(api_key, api_secret).map_err(|e| {
            tracing::error!(exchange = %identity, "Invalid API key or secret");
            ExchangeError::from(e)
        })?;

        Ok(Self::with_credentials(identity, credentials, context))
    }

    pub fn with_credentials(
        identity: ExchangeIdentity,
        credentials: ApiCredentials,
        context: Arc<ExchangeContext>,
    ) -> Self {
        Self {
            identity,
            credentials,
            digest: SignatureDigest::default(),
            context,
            market: RwLock::new(Arc::new(MarketData::default())),
            tradeable_pairs: RwLock::new(Arc::new(Vec::new())),
            wallets: RwLock::new(Arc::new(Wallets::new())),
            refresh: Mutex::new(()),
        }
    }

    /// Builder method to choose the HMAC digest used by [`Self::signed_query`].
    pub fn with_digest(mut self, digest: SignatureDigest) -> Self {
        self.digest = digest;
        self
    }

    pub fn identity(&self) -> &ExchangeIdentity {
        &self.identity
    }

    pub fn credentials(&self) -> &ApiCredentials {
        &self.credentials
    }

    pub fn context(&self) -> &ExchangeContext {
        &self.context
    }

    // ========================================================================
    // Market data
    // ========================================================================

    /// Current market data snapshot.
    pub fn market_data(&self) -> Arc<MarketData> {
        self.market.read().clone()
    }

    /// Replace the market data and recompute the tradeable pairs from it.
    ///
    /// Venues call this at the end of a successful metadata refresh.
    pub fn apply_market_data(&self, data: MarketData) {
        let _guard = self.refresh.lock();
        *self.market.write() = Arc::new(data);
        self.calculate_tradeable_pairs_locked();
    }

    /// Recompute the tradeable pairs from the current market data.
    pub fn calculate_tradeable_pairs(&self) {
        let _guard = self.refresh.lock();
        self.calculate_tradeable_pairs_locked();
    }

    fn calculate_tradeable_pairs_locked(&self) {
        let market = self.market_data();
        let pairs = pair_filter::tradeable_pairs(
            &market.pairs,
            &market.table,
            self.context.rates(),
            self.context.config(),
        );

        tracing::debug!(
            exchange = %self.identity,
            raw_pairs = market.pairs.len(),
            tradeable_pairs = pairs.len(),
            "Calculated tradeable pairs"
        );

        *self.tradeable_pairs.write() = Arc::new(pairs);
    }

    /// Last computed tradeable pairs; empty before the first computation.
    pub fn tradeable_pairs(&self) -> Arc<Vec<TradingPair>> {
        self.tradeable_pairs.read().clone()
    }

    /// Display name of a coin. Unknown coins are logged and yield `None`.
    pub fn coin_name(&self, asset: &AssetSymbol) -> Option<String> {
        let name = self.market.read().table.name(asset).map(str::to_string);
        if name.is_none() {
            tracing::warn!(
                exchange = %self.identity,
                asset = %asset,
                "Unknown coin name; another coin with the same abbreviation cannot be ruled out"
            );
        }
        name
    }

    /// Fee for transferring `amount` of `asset`, `None` when unknown.
    pub fn transfer_fee(&self, asset: &AssetSymbol, amount: Decimal) -> Option<Decimal> {
        self.market
            .read()
            .table
            .transfer_fee(asset)
            .map(|fee| fee.fee_for(amount))
    }

    /// Expected confirmation time in minutes. Unknown assets are logged and yield `None`.
    pub fn confirmation_time(&self, asset: &AssetSymbol) -> Option<u32> {
        let minutes = self.market.read().table.confirmation_time(asset);
        if minutes.is_none() {
            tracing::warn!(
                exchange = %self.identity,
                asset = %asset,
                "Unknown confirmation time; calculations may be inaccurate"
            );
        }
        minutes
    }

    // ========================================================================
    // Wallets
    // ========================================================================

    /// Cached wallet snapshot. Staleness is the caller's concern.
    pub fn wallets(&self) -> Arc<Wallets> {
        self.wallets.read().clone()
    }

    /// Replace the cached wallet snapshot.
    pub fn publish_wallets(&self, wallets: Wallets) {
        *self.wallets.write() = Arc::new(wallets);
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Next nonce for this venue identity.
    pub fn next_nonce(&self) -> u64 {
        self.context.nonces().next_nonce(&self.identity)
    }

    /// Sign `params` with a fresh nonce and return the full query string.
    pub fn signed_query(&self, params: &[(&str, &str)]) -> String {
        let nonce = self.next_nonce();
        RequestSigner::new(&self.credentials, self.digest).sign_params(params, nonce)
    }

    /// Query a public endpoint through the shared retrying client.
    pub async fn query_public(&self, url: &str) -> Result<String, ExchangeError> {
        let span = tracing::info_span!("public_query", exchange = %self.identity);
        Ok(self.context.public_client().query(url).instrument(span).await?)
    }

    /// Query a public endpoint and deserialize its JSON body.
    pub async fn query_public_json<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ExchangeError> {
        let span = tracing::info_span!("public_query", exchange = %self.identity);
        Ok(self
            .context
            .public_client()
            .query_json(url)
            .instrument(span)
            .await?)
    }
}

impl std::fmt::Debug for ExchangeCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeCore")
            .field("identity", &self.identity)
            .field("credentials", &self.credentials)
            .field("digest", &self.digest)
            .field("tradeable_pairs", &self.tradeable_pairs.read().len())
            .finish()
    }
}
