//! Risk management module
//!
//! Per-broker account tracking, trade admission, position sizing and
//! drawdown protection across all connected brokers.

mod limits;
mod manager;
mod sizing;
mod types;

pub use limits::{DrawdownBaseline, RiskLimits};
pub use manager::RiskManager;
pub use sizing::{broker_preference, composite_risk_score, drawdown_pct, max_lot_size};
pub use types::{
    BrokerDistribution, BrokerStatus, BrokerSummary, PortfolioSummary, RefreshError,
    RiskAssessment,
};
