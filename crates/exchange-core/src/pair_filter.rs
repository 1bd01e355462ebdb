//! Admission of raw venue pairs into the tradeable set.

use std::collections::HashMap;

use model::{AssetSymbol, TradingPair};
use rust_decimal::Decimal;

use crate::config::ExchangeConfig;
use crate::market_data::{RateFeeTable, TransferFee};

/// Reference price of an asset, used to value fixed transfer fees.
pub trait AverageRateSource: Send + Sync {
    fn average_rate(&self, asset: &AssetSymbol) -> Decimal;
}

/// Fixed rates held in memory. Unknown assets are valued at zero.
#[derive(Debug, Clone, Default)]
pub struct StaticRates {
    rates: HashMap<AssetSymbol, Decimal>,
}

impl StaticRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, asset: AssetSymbol, rate: Decimal) -> Self {
        self.rates.insert(asset, rate);
        self
    }
}

impl AverageRateSource for StaticRates {
    fn average_rate(&self, asset: &AssetSymbol) -> Decimal {
        self.rates.get(asset).copied().unwrap_or_default()
    }
}

/// Returns the raw pairs that pass both admission thresholds, in input order.
///
/// A pair is dropped when its tradeable has
/// - a fixed transfer fee with `fee * average_rate >= max_tx_fee_allowed`, or
/// - a confirmation time `>= max_confirmation_time_allowed`.
///
/// Percentage fees never exclude a pair, and missing fee or confirmation data
/// is not a reason to exclude one.
pub fn tradeable_pairs(
    pairs: &[TradingPair],
    table: &RateFeeTable,
    rates: &dyn AverageRateSource,
    config: &ExchangeConfig,
) -> Vec<TradingPair> {
    pairs
        .iter()
        .filter(|pair| is_admissible(pair.tradeable(), table, rates, config))
        .cloned()
        .collect()
}

fn is_admissible(
    tradeable: &AssetSymbol,
    table: &RateFeeTable,
    rates: &dyn AverageRateSource,
    config: &ExchangeConfig,
) -> bool {
    if let Some(TransferFee::Fixed(fee)) = table.transfer_fee(tradeable) {
        // A product beyond the Decimal range is certainly above the limit.
        match fee.checked_mul(rates.average_rate(tradeable)) {
            Some(value) if value < config.max_tx_fee_allowed => {}
            _ => return false,
        }
    }

    if let Some(minutes) = table.confirmation_time(tradeable) {
        if minutes >= config.max_confirmation_time_allowed {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sym(s: &str) -> AssetSymbol {
        AssetSymbol::new(s).unwrap()
    }

    fn pairs(raw: &[&str]) -> Vec<TradingPair> {
        raw.iter().map(|p| p.parse().unwrap()).collect()
    }

    fn config() -> ExchangeConfig {
        ExchangeConfig::new()
            .with_max_tx_fee_allowed(dec!(0.001))
            .with_max_confirmation_time_allowed(60)
    }

    #[test]
    fn test_pairs_without_reference_data_are_admitted() {
        let raw = pairs(&["ETH_BTC", "LTC_BTC"]);
        let result = tradeable_pairs(&raw, &RateFeeTable::new(), &StaticRates::new(), &config());
        assert_eq!(result, raw);
    }

    #[test]
    fn test_fixed_fee_threshold_is_inclusive() {
        // 0.01 ETH * 0.1 BTC/ETH = 0.001 BTC, exactly the limit.
        let table = RateFeeTable::new().with_transfer_fee(sym("ETH"), TransferFee::Fixed(dec!(0.01)));
        let rates = StaticRates::new().with_rate(sym("ETH"), dec!(0.1));

        let result = tradeable_pairs(&pairs(&["ETH_BTC", "LTC_BTC"]), &table, &rates, &config());
        assert_eq!(result, pairs(&["LTC_BTC"]));
    }

    #[test]
    fn test_fixed_fee_below_threshold_is_admitted() {
        let table = RateFeeTable::new().with_transfer_fee(sym("ETH"), TransferFee::Fixed(dec!(0.009)));
        let rates = StaticRates::new().with_rate(sym("ETH"), dec!(0.1));

        let result = tradeable_pairs(&pairs(&["ETH_BTC"]), &table, &rates, &config());
        assert_eq!(result, pairs(&["ETH_BTC"]));
    }

    #[test]
    fn test_percentage_fee_never_excludes() {
        let table = RateFeeTable::new()
            .with_transfer_fee(sym("XRP"), TransferFee::Percentage(dec!(1000000)));
        let rates = StaticRates::new().with_rate(sym("XRP"), dec!(1000));

        let result = tradeable_pairs(&pairs(&["XRP_BTC"]), &table, &rates, &config());
        assert_eq!(result, pairs(&["XRP_BTC"]));
    }

    #[test]
    fn test_confirmation_time_threshold_is_inclusive() {
        let table = RateFeeTable::new()
            .with_confirmation_time(sym("DOGE"), 60)
            .with_confirmation_time(sym("LTC"), 59);

        let result = tradeable_pairs(
            &pairs(&["DOGE_BTC", "LTC_BTC"]),
            &table,
            &StaticRates::new(),
            &config(),
        );
        assert_eq!(result, pairs(&["LTC_BTC"]));
    }

    #[test]
    fn test_filter_looks_at_tradeable_not_currency() {
        let table = RateFeeTable::new().with_confirmation_time(sym("BTC"), 600);

        let result = tradeable_pairs(
            &pairs(&["ETH_BTC", "BTC_USDT"]),
            &table,
            &StaticRates::new(),
            &config(),
        );
        assert_eq!(result, pairs(&["ETH_BTC"]));
    }

    #[test]
    fn test_result_is_subset_of_raw_pairs() {
        let raw = pairs(&["ETH_BTC", "ETH_USDT", "LTC_BTC", "DOGE_BTC", "XMR_BTC", "DASH_BTC"]);
        let table = RateFeeTable::new()
            .with_transfer_fee(sym("ETH"), TransferFee::Fixed(dec!(0.5)))
            .with_transfer_fee(sym("XMR"), TransferFee::Percentage(dec!(3)))
            .with_confirmation_time(sym("DOGE"), 120)
            .with_confirmation_time(sym("DASH"), 5);
        let rates = StaticRates::new().with_rate(sym("ETH"), dec!(0.05));

        let result = tradeable_pairs(&raw, &table, &rates, &config());

        assert!(result.iter().all(|pair| raw.contains(pair)));
        assert_eq!(result, pairs(&["LTC_BTC", "XMR_BTC", "DASH_BTC"]));
    }

    #[test]
    fn test_overflowing_fee_value_excludes_pair() {
        let table = RateFeeTable::new()
            .with_transfer_fee(sym("SHIB"), TransferFee::Fixed(Decimal::MAX))
            .with_transfer_fee(sym("ETH"), TransferFee::Fixed(dec!(0.001)));
        let rates = StaticRates::new()
            .with_rate(sym("SHIB"), dec!(2))
            .with_rate(sym("ETH"), dec!(0.05));

        let result = tradeable_pairs(&pairs(&["SHIB_BTC", "ETH_BTC"]), &table, &rates, &config());
        assert_eq!(result, pairs(&["ETH_BTC"]));
    }

    #[test]
    fn test_unknown_rate_values_fee_at_zero() {
        let table = RateFeeTable::new().with_transfer_fee(sym("NEW"), TransferFee::Fixed(dec!(100)));

        let result = tradeable_pairs(&pairs(&["NEW_BTC"]), &table, &StaticRates::new(), &config());
        assert_eq!(result, pairs(&["NEW_BTC"]));
    }
}
