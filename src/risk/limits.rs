//! Portfolio risk limits and drawdown policy

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Which baseline drawdown is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawdownBaseline {
    /// Balance observed the first time a broker is refreshed, fixed for the
    /// life of the process. Drawdown is measured from where the bot started,
    /// not from a later high.
    #[default]
    InitialBalance,
    /// Highest equity observed so far; the classic peak-to-trough measure.
    PeakEquity,
}

/// Portfolio and per-trade risk limits.
///
/// All limits are configurable; the defaults are the values the bot ships
/// with. `max_single_trade_risk_pct` and `min_free_margin_pct` are accepted
/// and reported but not yet enforced by the admit decision.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskLimits {
    /// Ceiling on (balance - equity) / balance per broker, percent
    #[serde(default = "default_portfolio_risk")]
    pub max_portfolio_risk_pct: Decimal,

    /// Ceiling on risk taken by a single trade, percent. Not yet enforced.
    #[serde(default = "default_single_trade_risk")]
    pub max_single_trade_risk_pct: Decimal,

    /// Free margin to keep in reserve, percent of balance. Not yet enforced.
    #[serde(default = "default_min_free_margin")]
    pub min_free_margin_pct: Decimal,

    /// Drawdown at which trading on a broker stops, percent
    #[serde(default = "default_max_drawdown")]
    pub max_drawdown_pct: Decimal,

    /// Flat margin requirement per lot. A stand-in for per-instrument margin
    /// schedules, not a real margin calculation.
    #[serde(default = "default_margin_per_lot")]
    pub margin_per_lot: Decimal,

    /// Hard cap on a single position, in lots
    #[serde(default = "default_max_lot")]
    pub max_lot_size: Decimal,

    /// Smallest lot a broker will accept
    #[serde(default = "default_min_lot")]
    pub min_lot_size: Decimal,

    /// Baseline for drawdown measurement
    #[serde(default)]
    pub drawdown_baseline: DrawdownBaseline,
}

fn default_portfolio_risk() -> Decimal {
    dec!(20)
}
fn default_single_trade_risk() -> Decimal {
    dec!(2)
}
fn default_min_free_margin() -> Decimal {
    dec!(30)
}
fn default_max_drawdown() -> Decimal {
    dec!(15)
}
fn default_margin_per_lot() -> Decimal {
    dec!(100)
}
fn default_max_lot() -> Decimal {
    dec!(10)
}
fn default_min_lot() -> Decimal {
    dec!(0.01)
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_portfolio_risk_pct: default_portfolio_risk(),
            max_single_trade_risk_pct: default_single_trade_risk(),
            min_free_margin_pct: default_min_free_margin(),
            max_drawdown_pct: default_max_drawdown(),
            margin_per_lot: default_margin_per_lot(),
            max_lot_size: default_max_lot(),
            min_lot_size: default_min_lot(),
            drawdown_baseline: DrawdownBaseline::InitialBalance,
        }
    }
}
