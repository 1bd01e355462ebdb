//! Domain types shared by every exchange crate.
//!
//! - [`AssetSymbol`]: a coin ticker such as `BTC`
//! - [`TradingPair`]: an ordered `(tradeable, currency)` pair, written `BTC_USDT` on the wire
//! - [`ExchangeIdentity`]: stable id plus display name of a venue instance
//! - [`Wallets`]: balances keyed by asset

mod error;
mod exchange;
mod symbol;

pub use error::ModelError;
pub use exchange::{ExchangeId, ExchangeIdentity, OrderSide};
pub use symbol::{AssetSymbol, TradingPair, PAIR_SEPARATOR};

use rust_decimal::Decimal;
use std::collections::HashMap;

/// Balances held on a venue, keyed by asset.
pub type Wallets = HashMap<AssetSymbol, Decimal>;
