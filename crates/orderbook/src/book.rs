//! Order book snapshot with sorted price levels.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use model::TradingPair;
use rust_decimal::Decimal;

use crate::level::PriceLevel;

/// Order book of one trading pair as returned by a venue.
///
/// Uses `BTreeMap` with `Decimal` keys:
/// - Bids use `Reverse<Decimal>` for descending order (highest first)
/// - Asks use `Decimal` directly for ascending order (lowest first)
///
/// Levels at the same price are merged; zero-quantity levels are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBook {
    pair: TradingPair,
    bids: BTreeMap<Reverse<Decimal>, Decimal>,
    asks: BTreeMap<Decimal, Decimal>,
}

impl OrderBook {
    /// Creates an empty book for `pair`.
    pub fn new(pair: TradingPair) -> Self {
        Self {
            pair,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
        }
    }

    /// Builds a book from `(price, quantity)` levels in any order.
    pub fn from_levels(
        pair: TradingPair,
        bids: &[(Decimal, Decimal)],
        asks: &[(Decimal, Decimal)],
    ) -> Self {
        let mut book = Self::new(pair);

        for (price, quantity) in bids {
            if !quantity.is_zero() {
                let level = book.bids.entry(Reverse(*price)).or_default();
                *level = level.saturating_add(*quantity);
            }
        }

        for (price, quantity) in asks {
            if !quantity.is_zero() {
                let level = book.asks.entry(*price).or_default();
                *level = level.saturating_add(*quantity);
            }
        }

        book
    }

    /// Returns the pair this book belongs to.
    pub fn pair(&self) -> &TradingPair {
        &self.pair
    }

    /// Returns the best (highest) bid price level.
    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.bids
            .iter()
            .next()
            .map(|(Reverse(price), qty)| PriceLevel::new(*price, *qty))
    }

    /// Returns the best (lowest) ask price level.
    pub fn best_ask(&self) -> Option<PriceLevel> {
        self.asks
            .iter()
            .next()
            .map(|(price, qty)| PriceLevel::new(*price, *qty))
    }

    /// Returns the mid price (average of best bid and best ask).
    ///
    /// `None` if a side is empty or the sum leaves the `Decimal` range.
    pub fn mid_price(&self) -> Option<Decimal> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        bid.price
            .checked_add(ask.price)
            .map(|sum| sum / Decimal::TWO)
    }

    /// Returns the spread (best ask - best bid).
    pub fn spread(&self) -> Option<Decimal> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        ask.price.checked_sub(bid.price)
    }

    /// Returns the top N bid price levels (highest to lowest).
    pub fn top_bids(&self, n: usize) -> Vec<PriceLevel> {
        self.bids
            .iter()
            .take(n)
            .map(|(Reverse(price), qty)| PriceLevel::new(*price, *qty))
            .collect()
    }

    /// Returns the top N ask price levels (lowest to highest).
    pub fn top_asks(&self, n: usize) -> Vec<PriceLevel> {
        self.asks
            .iter()
            .take(n)
            .map(|(price, qty)| PriceLevel::new(*price, *qty))
            .collect()
    }

    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// True when both sides are empty.
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
