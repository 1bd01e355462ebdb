//! Shared runtime for venue adapters.
//!
//! Every venue implementation embeds an [`ExchangeCore`] and implements the
//! [`Exchange`] capability set. The core owns the policy every venue follows
//! the same way:
//!
//! - **Pair admission**: raw pairs are filtered by transfer fee and
//!   confirmation time against [`ExchangeConfig`] thresholds
//! - **Reference lookups**: coin names, transfer fees, confirmation times
//! - **Order book sanity**: books whose best bid equals their best ask are
//!   suppressed by [`ExchangeExt::get_orderbook`]
//! - **Request plumbing**: per-venue nonces, HMAC signing and retried public queries
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                  ExchangeContext (one per process)                 │
//! │   ExchangeConfig · NonceRegistry · AverageRateSource · PublicClient │
//! └──────────────────────────────┬─────────────────────────────────────┘
//!                                │ Arc
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//!     │ExchangeCore │     │ExchangeCore │     │ExchangeCore │
//!     │  (venue A)  │     │  (venue B)  │     │  (venue C)  │
//!     └──────┬──────┘     └──────┬──────┘     └──────┬──────┘
//!            │ embedded in       │                   │
//!            ▼                   ▼                   ▼
//!     impl Exchange        impl Exchange       impl Exchange
//!            └──────── ExchangeExt (shared policy) ──┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use exchange_core::{ExchangeConfig, ExchangeContext, ExchangeCore, ExchangeExt, StaticRates};
//!
//! exchange_core::init_logging();
//!
//! let context = Arc::new(ExchangeContext::new(ExchangeConfig::from_env(), Arc::new(StaticRates::new()))?);
//! let venue = Poloniex::new(ExchangeCore::new(identity, key, secret, Arc::clone(&context))?);
//!
//! venue.refresh_exchange_data().await?;
//! for pair in venue.tradeable_pairs().iter() {
//!     if let Some(book) = venue.get_orderbook(pair).await? {
//!         tracing::info!(pair = %pair, mid = ?book.mid_price(), "Orderbook");
//!     }
//! }
//! ```

mod config;
mod context;
mod core;
mod error;
mod exchange;
mod market_data;
mod orderbook_gate;
mod pair_filter;

#[cfg(test)]
mod testing;

pub use config::{
    ExchangeConfig, DEFAULT_MAX_CONFIRMATION_TIME_ALLOWED, DEFAULT_MAX_TX_FEE_ALLOWED,
    MAX_CONFIRMATION_TIME_ALLOWED_VAR, MAX_TX_FEE_ALLOWED_VAR,
};
pub use context::ExchangeContext;
pub use self::core::ExchangeCore;
pub use error::ExchangeError;
pub use exchange::{BoxedExchange, Exchange, ExchangeExt, OrderId};
pub use market_data::{MarketData, RateFeeTable, TransferFee, PERCENTAGE_FEE_MULTIPLIER};
pub use orderbook_gate::check_orderbook;
pub use pair_filter::{tradeable_pairs, AverageRateSource, StaticRates};

// Re-exports so venue crates can depend on this crate alone.
pub use auth::{ApiCredentials, NonceRegistry, SignatureDigest};
pub use common::{init_logging, ExponentialBackoff};
pub use model::{AssetSymbol, ExchangeId, ExchangeIdentity, OrderSide, TradingPair, Wallets};
pub use orderbook::{OrderBook, PriceLevel};
pub use rest_client::{PublicClient, RetryPolicy};
