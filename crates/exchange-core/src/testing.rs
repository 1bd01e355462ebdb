//! Test support: stub transport, mock venue and a warning counter.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use auth::NonceRegistry;
use model::{AssetSymbol, ExchangeId, ExchangeIdentity, OrderSide, TradingPair, Wallets};
use orderbook::OrderBook;
use parking_lot::Mutex;
use rest_client::{PublicClient, PublicTransport, RestError, RetryPolicy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::config::ExchangeConfig;
use crate::context::ExchangeContext;
use crate::core::ExchangeCore;
use crate::error::ExchangeError;
use crate::exchange::Exchange;
use crate::market_data::MarketData;
use crate::pair_filter::StaticRates;

pub fn sym(s: &str) -> AssetSymbol {
    AssetSymbol::new(s).unwrap()
}

/// Counts `WARN` events emitted while a closure runs on this thread.
#[derive(Clone, Default)]
pub struct WarnCounter {
    count: Arc<AtomicUsize>,
}

impl WarnCounter {
    pub fn count<R>(f: impl FnOnce() -> R) -> (R, usize) {
        let counter = Self::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, counter.count.load(Ordering::SeqCst))
    }

    /// Install on the current thread until the guard drops.
    pub fn install() -> (tracing::subscriber::DefaultGuard, Self) {
        let counter = Self::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        (tracing::subscriber::set_default(subscriber), counter)
    }

    pub fn warnings(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Transport that replays scripted outcomes and counts calls.
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<String, RestError>>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(outcomes: Vec<Result<String, RestError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(times: usize) -> Arc<Self> {
        Self::new(
            (0..times)
                .map(|i| Err(RestError::Connection(format!("refused #{}", i + 1))))
                .collect(),
        )
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PublicTransport for ScriptedTransport {
    async fn get(&self, _url: &str) -> Result<String, RestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(RestError::Connection("script exhausted".into())))
    }
}

pub fn context_with(config: ExchangeConfig, rates: StaticRates) -> Arc<ExchangeContext> {
    context_from_parts(config, rates, ScriptedTransport::new(Vec::new()))
}

pub fn context_with_transport(transport: Arc<ScriptedTransport>) -> Arc<ExchangeContext> {
    context_from_parts(ExchangeConfig::default(), StaticRates::new(), transport)
}

pub fn test_context() -> Arc<ExchangeContext> {
    context_with(ExchangeConfig::default(), StaticRates::new())
}

fn context_from_parts(
    config: ExchangeConfig,
    rates: StaticRates,
    transport: Arc<ScriptedTransport>,
) -> Arc<ExchangeContext> {
    let public = PublicClient::new(transport, RetryPolicy::default());
    Arc::new(ExchangeContext::with_parts(
        config,
        NonceRegistry::new(),
        Arc::new(rates),
        public,
    ))
}

/// In-memory venue implementing the full capability set.
pub struct MockVenue {
    core: ExchangeCore,
    next_market: Mutex<MarketData>,
    next_wallets: Mutex<Wallets>,
    raw_book: Mutex<Option<OrderBook>>,
    pending_deposits: Mutex<Wallets>,
    open_orders: Mutex<HashMap<String, (OrderSide, TradingPair, Decimal, Decimal)>>,
    order_seq: AtomicUsize,
}

impl MockVenue {
    pub fn new(context: Arc<ExchangeContext>) -> Self {
        let identity = ExchangeIdentity::new(ExchangeId(9), "MockVenue");
        Self {
            core: ExchangeCore::new(identity, Some("key".into()), Some("secret".into()), context)
                .unwrap(),
            next_market: Mutex::new(MarketData::default()),
            next_wallets: Mutex::new(Wallets::new()),
            raw_book: Mutex::new(None),
            pending_deposits: Mutex::new(Wallets::new()),
            open_orders: Mutex::new(HashMap::new()),
            order_seq: AtomicUsize::new(0),
        }
    }

    pub fn set_market(&self, data: MarketData) {
        *self.next_market.lock() = data;
    }

    pub fn set_balances(&self, wallets: Wallets) {
        *self.next_wallets.lock() = wallets;
    }

    pub fn set_pending_deposits(&self, wallets: Wallets) {
        *self.pending_deposits.lock() = wallets;
    }

    pub fn set_raw_book(&self, book: Option<OrderBook>) {
        *self.raw_book.lock() = book;
    }

    pub fn open_order_count(&self) -> usize {
        self.open_orders.lock().len()
    }

    fn place(
        &self,
        side: OrderSide,
        pair: &TradingPair,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<String, ExchangeError> {
        if amount < self.smallest_order_size() {
            return Err(ExchangeError::InvalidOrder(format!(
                "amount {} below minimum {}",
                amount,
                self.smallest_order_size()
            )));
        }
        let id = format!("order-{}", self.order_seq.fetch_add(1, Ordering::SeqCst));
        self.open_orders
            .lock()
            .insert(id.clone(), (side, pair.clone(), rate, amount));
        Ok(id)
    }
}

#[async_trait]
impl Exchange for MockVenue {
    fn core(&self) -> &ExchangeCore {
        &self.core
    }

    fn smallest_order_size(&self) -> Decimal {
        dec!(0.0001)
    }

    async fn get_tickers(
        &self,
        currency: &AssetSymbol,
    ) -> Result<HashMap<AssetSymbol, Decimal>, ExchangeError> {
        Ok(self
            .core
            .tradeable_pairs()
            .iter()
            .filter(|pair| pair.currency() == currency)
            .map(|pair| (pair.tradeable().clone(), dec!(0.05)))
            .collect())
    }

    async fn withdraw(
        &self,
        coin: &AssetSymbol,
        amount: Decimal,
        address: &str,
    ) -> Result<(), ExchangeError> {
        let mut wallets = (*self.core.wallets()).clone();
        let balance = wallets.entry(coin.clone()).or_default();
        if *balance < amount || address.is_empty() {
            return Err(ExchangeError::Venue {
                exchange: self.core.identity().to_string(),
                message: "withdrawal rejected".into(),
            });
        }
        *balance -= amount;
        self.core.publish_wallets(wallets);
        Ok(())
    }

    async fn get_deposit_address(
        &self,
        coin: &AssetSymbol,
    ) -> Result<Option<String>, ExchangeError> {
        Ok(Some(format!("{}-deposit-address", coin)))
    }

    async fn buy(
        &self,
        pair: &TradingPair,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<String, ExchangeError> {
        self.place(OrderSide::Buy, pair, rate, amount)
    }

    async fn sell(
        &self,
        pair: &TradingPair,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<String, ExchangeError> {
        self.place(OrderSide::Sell, pair, rate, amount)
    }

    async fn cancel_order(&self, order_id: &str) -> Result<bool, ExchangeError> {
        Ok(self.open_orders.lock().remove(order_id).is_some())
    }

    async fn cancel_all_orders(&self) -> Result<(), ExchangeError> {
        self.open_orders.lock().clear();
        Ok(())
    }

    async fn get_filled_order_price(
        &self,
        side: OrderSide,
        pair: &TradingPair,
        order_id: &str,
    ) -> Result<Option<Decimal>, ExchangeError> {
        Ok(self
            .open_orders
            .lock()
            .get(order_id)
            .filter(|(s, p, _, _)| *s == side && p == pair)
            .map(|(_, _, rate, _)| *rate))
    }

    async fn refresh_exchange_data(&self) -> Result<(), ExchangeError> {
        let data = self.next_market.lock().clone();
        self.core.apply_market_data(data);
        Ok(())
    }

    async fn dump_wallets(&self) -> Result<(), ExchangeError> {
        for (asset, balance) in self.core.wallets().iter() {
            tracing::info!(exchange = %self.core.identity(), asset = %asset, balance = %balance, "Wallet");
        }
        Ok(())
    }

    async fn refresh_wallets(&self) -> Result<(), ExchangeError> {
        let wallets = self.next_wallets.lock().clone();
        self.core.publish_wallets(wallets);
        Ok(())
    }

    async fn detect_stuck_transfers(&self) -> Result<(), ExchangeError> {
        Ok(())
    }

    async fn test_access(&self) -> Result<(), ExchangeError> {
        let _ = self.core.signed_query(&[("command", "returnBalances")]);
        Ok(())
    }

    async fn wallets_considering_pending_deposits(&self) -> Result<Wallets, ExchangeError> {
        let mut wallets = (*self.core.wallets()).clone();
        for (asset, pending) in self.pending_deposits.lock().iter() {
            *wallets.entry(asset.clone()).or_default() += *pending;
        }
        Ok(wallets)
    }

    async fn fetch_orderbook(&self, _pair: &TradingPair) -> Result<Option<OrderBook>, ExchangeError> {
        Ok(self.raw_book.lock().clone())
    }
}
