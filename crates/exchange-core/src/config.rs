//! Admission thresholds and query settings shared by all venues.

use std::str::FromStr;

use rest_client::RetryPolicy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Environment variable overriding [`ExchangeConfig::max_tx_fee_allowed`].
pub const MAX_TX_FEE_ALLOWED_VAR: &str = "MAX_TX_FEE_ALLOWED";

/// Environment variable overriding [`ExchangeConfig::max_confirmation_time_allowed`].
pub const MAX_CONFIRMATION_TIME_ALLOWED_VAR: &str = "MAX_CONFIRMATION_TIME_ALLOWED";

/// Default for [`ExchangeConfig::max_tx_fee_allowed`].
pub const DEFAULT_MAX_TX_FEE_ALLOWED: Decimal = dec!(0.0005);

/// Default for [`ExchangeConfig::max_confirmation_time_allowed`], in minutes.
pub const DEFAULT_MAX_CONFIRMATION_TIME_ALLOWED: u32 = 60;

/// Configuration consumed by the exchange core.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Pairs whose fixed transfer fee, converted at the average rate, reaches
    /// this value are not tradeable.
    pub max_tx_fee_allowed: Decimal,

    /// Pairs whose tradeable takes at least this many minutes to confirm are
    /// not tradeable.
    pub max_confirmation_time_allowed: u32,

    /// Retry policy of the public query client.
    #[serde(skip)]
    pub retry: RetryPolicy,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            max_tx_fee_allowed: DEFAULT_MAX_TX_FEE_ALLOWED,
            max_confirmation_time_allowed: DEFAULT_MAX_CONFIRMATION_TIME_ALLOWED,
            retry: RetryPolicy::default(),
        }
    }
}

impl ExchangeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load thresholds from environment variables.
    ///
    /// Unset variables keep their defaults; unparseable ones are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load thresholds through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            max_tx_fee_allowed: parse_or(
                &lookup,
                MAX_TX_FEE_ALLOWED_VAR,
                defaults.max_tx_fee_allowed,
            ),
            max_confirmation_time_allowed: parse_or(
                &lookup,
                MAX_CONFIRMATION_TIME_ALLOWED_VAR,
                defaults.max_confirmation_time_allowed,
            ),
            retry: defaults.retry,
        }
    }

    /// Builder method to set the maximum transfer fee.
    pub fn with_max_tx_fee_allowed(mut self, limit: Decimal) -> Self {
        self.max_tx_fee_allowed = limit;
        self
    }

    /// Builder method to set the maximum confirmation time.
    pub fn with_max_confirmation_time_allowed(mut self, minutes: u32) -> Self {
        self.max_confirmation_time_allowed = minutes;
        self
    }

    /// Builder method to set the public query retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match lookup(name) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(
                    variable = name,
                    value = %raw,
                    default = %default,
                    "Ignoring unparseable configuration value"
                );
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ExchangeConfig::default();

        assert_eq!(config.max_tx_fee_allowed, dec!(0.0005));
        assert_eq!(config.max_confirmation_time_allowed, 60);
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_builder_methods() {
        let config = ExchangeConfig::new()
            .with_max_tx_fee_allowed(dec!(0.01))
            .with_max_confirmation_time_allowed(30)
            .with_retry(RetryPolicy::immediate(2));

        assert_eq!(config.max_tx_fee_allowed, dec!(0.01));
        assert_eq!(config.max_confirmation_time_allowed, 30);
        assert_eq!(config.retry.max_attempts, 2);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            (MAX_TX_FEE_ALLOWED_VAR, "0.002"),
            (MAX_CONFIRMATION_TIME_ALLOWED_VAR, " 45 "),
        ]
        .into_iter()
        .collect();

        let config = ExchangeConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.max_tx_fee_allowed, dec!(0.002));
        assert_eq!(config.max_confirmation_time_allowed, 45);
    }

    #[test]
    fn test_from_lookup_falls_back_on_garbage() {
        let config = ExchangeConfig::from_lookup(|name| match name {
            MAX_TX_FEE_ALLOWED_VAR => Some("cheap".to_string()),
            MAX_CONFIRMATION_TIME_ALLOWED_VAR => Some("-1".to_string()),
            _ => None,
        });

        assert_eq!(config.max_tx_fee_allowed, DEFAULT_MAX_TX_FEE_ALLOWED);
        assert_eq!(
            config.max_confirmation_time_allowed,
            DEFAULT_MAX_CONFIRMATION_TIME_ALLOWED
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ExchangeConfig =
            serde_json::from_str(r#"{"max_confirmation_time_allowed": 15}"#).unwrap();

        assert_eq!(config.max_confirmation_time_allowed, 15);
        assert_eq!(config.max_tx_fee_allowed, DEFAULT_MAX_TX_FEE_ALLOWED);
    }
}
