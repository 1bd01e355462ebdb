//! The venue capability contract.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use model::{AssetSymbol, ExchangeId, ExchangeIdentity, OrderSide, TradingPair, Wallets};
use orderbook::OrderBook;
use rust_decimal::Decimal;

use crate::core::ExchangeCore;
use crate::error::ExchangeError;
use crate::orderbook_gate;

/// Exchange-assigned order identifier.
pub type OrderId = String;

/// Capability set every venue adapter implements.
///
/// A venue embeds an [`ExchangeCore`] and exposes it through [`Exchange::core`];
/// the cross-venue policy (pair admission, fee and confirmation lookups,
/// order book sanity, nonces) is then available through [`ExchangeExt`].
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use exchange_core::{Exchange, ExchangeCore, ExchangeError};
///
/// struct Poloniex {
///     core: ExchangeCore,
/// }
///
/// #[async_trait]
/// impl Exchange for Poloniex {
///     fn core(&self) -> &ExchangeCore {
///         &self.core
///     }
///
///     async fn refresh_exchange_data(&self) -> Result<(), ExchangeError> {
///         let data = self.fetch_currencies().await?;
///         self.core.apply_market_data(data);
///         Ok(())
///     }
///
///     // ...
/// }
/// ```
#[async_trait]
pub trait Exchange: Send + Sync {
    /// Shared state and policy of this venue instance.
    fn core(&self) -> &ExchangeCore;

    /// Smallest order amount the venue accepts.
    fn smallest_order_size(&self) -> Decimal;

    /// Price including the venue's trading fee. Zero fee by default.
    fn add_fee_to_price(&self, price: Decimal) -> Decimal {
        price
    }

    /// Amount received from a buy after the venue's trading fee. Zero fee by default.
    fn deduct_fee_from_amount_buy(&self, amount: Decimal) -> Decimal {
        amount
    }

    /// Amount received from a sell after the venue's trading fee. Zero fee by default.
    fn deduct_fee_from_amount_sell(&self, amount: Decimal) -> Decimal {
        amount
    }

    /// Last prices of every tradeable quoted in `currency`.
    async fn get_tickers(
        &self,
        currency: &AssetSymbol,
    ) -> Result<HashMap<AssetSymbol, Decimal>, ExchangeError>;

    /// Withdraw `amount` of `coin` to `address`.
    async fn withdraw(
        &self,
        coin: &AssetSymbol,
        amount: Decimal,
        address: &str,
    ) -> Result<(), ExchangeError>;

    /// Deposit address for `coin`, if the venue has one.
    async fn get_deposit_address(&self, coin: &AssetSymbol)
        -> Result<Option<String>, ExchangeError>;

    /// Place a limit buy order.
    async fn buy(
        &self,
        pair: &TradingPair,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<OrderId, ExchangeError>;

    /// Place a limit sell order.
    async fn sell(
        &self,
        pair: &TradingPair,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<OrderId, ExchangeError>;

    /// Cancel one order. Returns `false` if the venue did not know the order.
    async fn cancel_order(&self, order_id: &str) -> Result<bool, ExchangeError>;

    /// Cancel every open order.
    async fn cancel_all_orders(&self) -> Result<(), ExchangeError>;

    /// Average price an order was filled at, if it was filled.
    async fn get_filled_order_price(
        &self,
        side: OrderSide,
        pair: &TradingPair,
        order_id: &str,
    ) -> Result<Option<Decimal>, ExchangeError>;

    /// Reload pairs, transfer fees, confirmation times and coin names.
    ///
    /// Must finish with [`ExchangeCore::apply_market_data`] so the tradeable
    /// pairs are recomputed.
    async fn refresh_exchange_data(&self) -> Result<(), ExchangeError>;

    /// Log the current balances.
    async fn dump_wallets(&self) -> Result<(), ExchangeError>;

    /// Reload balances and publish them with [`ExchangeCore::publish_wallets`].
    async fn refresh_wallets(&self) -> Result<(), ExchangeError>;

    /// Look for deposits or withdrawals that are not progressing.
    async fn detect_stuck_transfers(&self) -> Result<(), ExchangeError>;

    /// Verify the credentials with an authenticated call.
    async fn test_access(&self) -> Result<(), ExchangeError>;

    /// Balances including deposits that have not been credited yet.
    async fn wallets_considering_pending_deposits(&self) -> Result<Wallets, ExchangeError>;

    /// Raw order book for `pair`. Callers use [`ExchangeExt::get_orderbook`].
    async fn fetch_orderbook(&self, pair: &TradingPair) -> Result<Option<OrderBook>, ExchangeError>;
}

/// Shared behavior of every [`Exchange`]. Implemented for all venues and not
/// meant to be overridden.
#[async_trait]
pub trait ExchangeExt: Exchange {
    fn identity(&self) -> &ExchangeIdentity {
        self.core().identity()
    }

    fn id(&self) -> ExchangeId {
        self.core().identity().id()
    }

    fn name(&self) -> &str {
        self.core().identity().name()
    }

    /// Last computed tradeable pairs; empty before the first refresh.
    fn tradeable_pairs(&self) -> Arc<Vec<TradingPair>> {
        self.core().tradeable_pairs()
    }

    /// Cached balances.
    fn wallets(&self) -> Arc<Wallets> {
        self.core().wallets()
    }

    /// Display name of `coin`; `None` (with a warning) when unknown.
    fn coin_name(&self, coin: &AssetSymbol) -> Option<String> {
        self.core().coin_name(coin)
    }

    /// Fee for transferring `amount` of `coin`; `None` when unknown.
    fn transfer_fee(&self, coin: &AssetSymbol, amount: Decimal) -> Option<Decimal> {
        self.core().transfer_fee(coin, amount)
    }

    /// Confirmation time of `coin` in minutes; `None` (with a warning) when unknown.
    fn confirmation_time(&self, coin: &AssetSymbol) -> Option<u32> {
        self.core().confirmation_time(coin)
    }

    /// Next nonce for this venue identity.
    fn next_nonce(&self) -> u64 {
        self.core().next_nonce()
    }

    /// Order book for `pair`, or `None` if the venue has none or it is drunk.
    async fn get_orderbook(&self, pair: &TradingPair) -> Result<Option<OrderBook>, ExchangeError> {
        let book = self.fetch_orderbook(pair).await?;
        Ok(book.and_then(|book| orderbook_gate::check_orderbook(self.core().identity(), book)))
    }

    /// Query a public endpoint with retries.
    async fn query_public(&self, url: &str) -> Result<String, ExchangeError> {
        self.core().query_public(url).await
    }
}

impl<T: Exchange + ?Sized> ExchangeExt for T {}

/// A boxed exchange trait object.
pub type BoxedExchange = Box<dyn Exchange>;
