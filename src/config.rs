//! Configuration types for trade-guard

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::HashMap;

use crate::hours::MarketHours;
use crate::risk::RiskLimits;

/// Root configuration structure
///
/// Every section is optional in the TOML file; missing sections fall back to
/// the shipped defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub risk: RiskLimits,
    #[serde(default)]
    pub trailing: TrailingConfig,
    /// Per-instrument trading-hours overrides. An entry replaces the whole
    /// built-in record for that instrument.
    #[serde(default)]
    pub market_hours: HashMap<String, MarketHours>,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Trailing-stop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TrailingConfig {
    /// Whether trailing stops are maintained at all
    #[serde(default)]
    pub use_trailing_stop: bool,

    /// Distance between price and stop, percent of price
    #[serde(default = "default_trailing_distance")]
    pub trailing_stop_distance: Decimal,
}

fn default_trailing_distance() -> Decimal {
    dec!(1.5)
}

impl Default for TrailingConfig {
    fn default() -> Self {
        Self {
            use_trailing_stop: false,
            trailing_stop_distance: default_trailing_distance(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
