//! Asset symbols and trading pairs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Separator between the tradeable and the currency in a pair string.
pub const PAIR_SEPARATOR: char = '_';

/// Ticker of a tradeable unit, e.g. `BTC`.
///
/// Stored upper-case. Never empty and never contains [`PAIR_SEPARATOR`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetSymbol(String);

impl AssetSymbol {
    pub fn new(symbol: impl AsRef<str>) -> Result<Self, ModelError> {
        let raw = symbol.as_ref().trim();
        if raw.is_empty() || raw.contains(PAIR_SEPARATOR) || raw.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidSymbol(symbol.as_ref().to_string()));
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AssetSymbol {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AssetSymbol {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AssetSymbol> for String {
    fn from(symbol: AssetSymbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for AssetSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An ordered `(tradeable, currency)` pair.
///
/// Rendered as `TRADEABLE_CURRENCY`. Parsing splits on the first `_`, and the
/// remainder must itself be a valid [`AssetSymbol`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TradingPair {
    tradeable: AssetSymbol,
    currency: AssetSymbol,
}

impl TradingPair {
    pub fn new(tradeable: AssetSymbol, currency: AssetSymbol) -> Self {
        Self {
            tradeable,
            currency,
        }
    }

    /// Base unit being bought or sold.
    pub fn tradeable(&self) -> &AssetSymbol {
        &self.tradeable
    }

    /// Quote unit the tradeable is priced in.
    pub fn currency(&self) -> &AssetSymbol {
        &self.currency
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.tradeable, PAIR_SEPARATOR, self.currency)
    }
}

impl FromStr for TradingPair {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tradeable, currency) = s
            .split_once(PAIR_SEPARATOR)
            .ok_or_else(|| ModelError::InvalidPair(s.to_string()))?;

        let tradeable =
            AssetSymbol::new(tradeable).map_err(|_| ModelError::InvalidPair(s.to_string()))?;
        let currency =
            AssetSymbol::new(currency).map_err(|_| ModelError::InvalidPair(s.to_string()))?;

        Ok(Self::new(tradeable, currency))
    }
}

impl TryFrom<String> for TradingPair {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TradingPair> for String {
    fn from(pair: TradingPair) -> Self {
        pair.to_string()
    }
}
