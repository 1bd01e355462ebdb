//! Per-venue reference data: raw pairs, transfer fees, confirmation times and coin names.

use std::collections::HashMap;
use std::str::FromStr;

use model::{AssetSymbol, TradingPair};
use rust_decimal::Decimal;

/// Factor applied to a stored percentage before multiplying it with the amount.
///
/// Stored percentage values are used as plain multipliers, so a `2%` entry
/// yields `amount * 2`. Set to `0.01` to read them as true percentages.
pub const PERCENTAGE_FEE_MULTIPLIER: Decimal = Decimal::ONE;

/// Cost of transferring an asset off a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFee {
    /// Flat amount, denominated in the asset itself.
    Fixed(Decimal),
    /// Amount-dependent fee; holds the number written before the `%` sign.
    Percentage(Decimal),
}

impl TransferFee {
    /// Fee charged for transferring `amount`.
    ///
    /// Fixed fees ignore the amount. Percentage fees saturate at the
    /// `Decimal` bounds.
    pub fn fee_for(&self, amount: Decimal) -> Decimal {
        match self {
            Self::Fixed(fee) => *fee,
            Self::Percentage(value) => amount
                .saturating_mul(*value)
                .saturating_mul(PERCENTAGE_FEE_MULTIPLIER),
        }
    }

    pub fn is_percentage(&self) -> bool {
        matches!(self, Self::Percentage(_))
    }
}

impl FromStr for TransferFee {
    type Err = rust_decimal::Error;

    /// Parses the venue notation: `"0.001"` is fixed, `"2%"` is a percentage.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_suffix('%') {
            Some(value) => Ok(Self::Percentage(Decimal::from_str(value.trim())?)),
            None => Ok(Self::Fixed(Decimal::from_str(s)?)),
        }
    }
}

/// Transfer fee, confirmation time and display name lookups, keyed by asset.
///
/// Each asset has at most one fee representation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateFeeTable {
    transfer_fees: HashMap<AssetSymbol, TransferFee>,
    confirmation_times: HashMap<AssetSymbol, u32>,
    names: HashMap<AssetSymbol, String>,
}

impl RateFeeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to record a transfer fee, replacing any previous one.
    pub fn with_transfer_fee(mut self, asset: AssetSymbol, fee: TransferFee) -> Self {
        self.set_transfer_fee(asset, fee);
        self
    }

    /// Builder method to record a confirmation time in minutes.
    pub fn with_confirmation_time(mut self, asset: AssetSymbol, minutes: u32) -> Self {
        self.set_confirmation_time(asset, minutes);
        self
    }

    /// Builder method to record a coin's display name.
    pub fn with_name(mut self, asset: AssetSymbol, name: impl Into<String>) -> Self {
        self.set_name(asset, name);
        self
    }

    pub fn set_transfer_fee(&mut self, asset: AssetSymbol, fee: TransferFee) {
        self.transfer_fees.insert(asset, fee);
    }

    pub fn set_confirmation_time(&mut self, asset: AssetSymbol, minutes: u32) {
        self.confirmation_times.insert(asset, minutes);
    }

    pub fn set_name(&mut self, asset: AssetSymbol, name: impl Into<String>) {
        self.names.insert(asset, name.into());
    }

    pub fn transfer_fee(&self, asset: &AssetSymbol) -> Option<TransferFee> {
        self.transfer_fees.get(asset).copied()
    }

    pub fn confirmation_time(&self, asset: &AssetSymbol) -> Option<u32> {
        self.confirmation_times.get(asset).copied()
    }

    pub fn name(&self, asset: &AssetSymbol) -> Option<&str> {
        self.names.get(asset).map(String::as_str)
    }
}

/// Everything a venue's metadata refresh produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketData {
    /// The venue's raw pair universe.
    pub pairs: Vec<TradingPair>,
    /// Fee, confirmation and name lookups for the venue's assets.
    pub table: RateFeeTable,
}

impl MarketData {
    pub fn new(pairs: Vec<TradingPair>, table: RateFeeTable) -> Self {
        Self { pairs, table }
    }
}
