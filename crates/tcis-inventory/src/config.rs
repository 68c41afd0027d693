//! # Inventory Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TCIS_*`)
//! 2. Defaults (this file)
//!
//! Business constants (capacities, the handling fee) live in `tcis-core`
//! and are not configurable.

use serde::{Deserialize, Serialize};
use tcis_core::Money;
use tracing::warn;

pub const ENV_TRADE_THRESHOLD: &str = "TCIS_TRADE_THRESHOLD";
pub const ENV_LOG_FILTER: &str = "TCIS_LOG";
pub const ENV_CURRENCY_SYMBOL: &str = "TCIS_CURRENCY_SYMBOL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryConfig {
    /// Trades whose value difference reaches this amount need confirmation.
    pub trade_warning_threshold: Money,

    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for InventoryConfig {
    /// ## Default Values
    /// - Trade warning: $1.00
    /// - Logging: `info`, `debug` for this workspace
    /// - Currency: `$`
    fn default() -> Self {
        InventoryConfig {
            trade_warning_threshold: Money::from_cents(100),
            log_filter: "info,tcis=debug".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl InventoryConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TCIS_TRADE_THRESHOLD`: decimal dollars, e.g. "2.50"
    /// - `TCIS_LOG`: tracing filter directives
    /// - `TCIS_CURRENCY_SYMBOL`: display symbol
    ///
    /// Unparseable values are logged and the default kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = InventoryConfig::default();

        if let Some(raw) = lookup(ENV_TRADE_THRESHOLD) {
            match raw.parse::<Money>() {
                Ok(threshold) if !threshold.is_negative() => {
                    config.trade_warning_threshold = threshold;
                }
                Ok(_) => warn!(var = ENV_TRADE_THRESHOLD, value = %raw, "Negative threshold ignored"),
                Err(e) => warn!(var = ENV_TRADE_THRESHOLD, value = %raw, error = %e, "Invalid threshold ignored"),
            }
        }

        if let Some(filter) = lookup(ENV_LOG_FILTER) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Formats money with the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use tcis_core::Money;
    /// use tcis_inventory::InventoryConfig;
    ///
    /// let config = InventoryConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_money(&self, money: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if money.is_negative() { "-" } else { "" },
            self.currency_symbol,
            money.dollars().abs(),
            money.cents_part().abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = InventoryConfig::default();
        assert_eq!(config.trade_warning_threshold.cents(), 100);
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(InventoryConfig::from_lookup(|_| None), config);
    }

    #[test]
    fn test_overrides() {
        let config = InventoryConfig::from_lookup(lookup_from(&[
            (ENV_TRADE_THRESHOLD, "2.50"),
            (ENV_LOG_FILTER, "warn"),
            (ENV_CURRENCY_SYMBOL, "€"),
        ]));

        assert_eq!(config.trade_warning_threshold.cents(), 250);
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.format_money(Money::from_cents(199)), "€1.99");
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = InventoryConfig::from_lookup(lookup_from(&[
            (ENV_TRADE_THRESHOLD, "lots"),
            (ENV_LOG_FILTER, "  "),
        ]));
        assert_eq!(config, InventoryConfig::default());

        let negative = InventoryConfig::from_lookup(lookup_from(&[(ENV_TRADE_THRESHOLD, "-1")]));
        assert_eq!(negative.trade_warning_threshold.cents(), 100);
    }

    #[test]
    fn test_format_money() {
        let config = InventoryConfig::default();
        assert_eq!(config.format_money(Money::from_cents(0)), "$0.00");
        assert_eq!(config.format_money(Money::from_cents(5)), "$0.05");
        assert_eq!(config.format_money(Money::from_cents(-1250)), "-$12.50");
    }
}
