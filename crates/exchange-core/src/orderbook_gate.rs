//! Rejection of order books from a malfunctioning feed.

use model::ExchangeIdentity;
use orderbook::OrderBook;

/// Returns `book` unless its best ask equals its best bid.
///
/// Such a "drunk" book is logged and suppressed. Nothing else is checked; a
/// book missing either side cannot be compared and is passed through.
pub fn check_orderbook(identity: &ExchangeIdentity, book: OrderBook) -> Option<OrderBook> {
    match (book.best_bid(), book.best_ask()) {
        (Some(bid), Some(ask)) if bid.price == ask.price => {
            tracing::warn!(
                exchange = %identity,
                pair = %book.pair(),
                price = %bid.price,
                "Orderbook is drunk!"
            );
            None
        }
        _ => Some(book),
    }
}
