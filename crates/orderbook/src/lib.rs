//! Point-in-time order book snapshots fetched from venues.
//!
//! # Example
//!
//! ```rust
//! use orderbook::OrderBook;
//! use rust_decimal_macros::dec;
//!
//! let pair = "ETH_BTC".parse().unwrap();
//! let bids = vec![(dec!(0.050), dec!(1.0)), (dec!(0.049), dec!(2.0))];
//! let asks = vec![(dec!(0.051), dec!(1.5)), (dec!(0.052), dec!(2.5))];
//! let book = OrderBook::from_levels(pair, &bids, &asks);
//!
//! assert_eq!(book.best_bid().unwrap().price, dec!(0.050));
//! assert_eq!(book.best_ask().unwrap().price, dec!(0.051));
//! assert_eq!(book.spread(), Some(dec!(0.001)));
//! ```

mod book;
mod level;

pub use book::OrderBook;
pub use level::PriceLevel;
