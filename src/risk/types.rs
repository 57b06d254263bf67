//! Risk management types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::broker::AccountInfo;

/// Why a broker refresh produced no fresh snapshot this tick.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Account snapshot could not be fetched
    #[error("account info for {broker}: {reason}")]
    AccountInfo { broker: String, reason: String },
    /// Open-position query failed
    #[error("open positions for {broker}: {reason}")]
    Positions { broker: String, reason: String },
}

/// Latest known state of a single broker account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerStatus {
    /// Broker name, unique across the book
    pub name: String,
    /// Account balance
    pub balance: Decimal,
    /// Current equity
    pub equity: Decimal,
    /// Margin in use
    pub margin_used: Decimal,
    /// Margin available for new positions
    pub free_margin: Decimal,
    /// Open positions held at this broker
    pub open_positions: usize,
    /// (balance - equity) / balance, as a percentage; 0 for empty accounts
    pub risk_percent: Decimal,
    /// Whether the broker is below the portfolio risk ceiling
    pub is_available: bool,
    /// When this snapshot was taken
    pub last_updated: DateTime<Utc>,
}

impl BrokerStatus {
    /// Build a status snapshot from a fresh account read.
    pub fn from_account(
        name: &str,
        info: &AccountInfo,
        open_positions: usize,
        risk_ceiling_pct: Decimal,
    ) -> Self {
        let risk_percent = if info.balance > Decimal::ZERO {
            (info.balance - info.equity) / info.balance * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        Self {
            name: name.to_string(),
            balance: info.balance,
            equity: info.equity,
            margin_used: info.margin,
            free_margin: info.free_margin,
            open_positions,
            risk_percent,
            is_available: risk_percent < risk_ceiling_pct,
            last_updated: Utc::now(),
        }
    }
}

/// Verdict on a proposed trade.
///
/// Produced fresh on every assessment; never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Whether the trade may be placed
    pub can_trade: bool,
    /// The binding constraint, in words
    pub reason: String,
    /// Broker that should execute the trade, when one qualifies
    pub recommended_broker: Option<String>,
    /// Largest admissible position, in lots
    pub max_lot_size: Decimal,
    /// Composite risk score, 0 (calm) to 100 (do not trade)
    pub risk_score: Decimal,
}

impl RiskAssessment {
    /// A denial with no eligible broker and the score pinned to 100.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            can_trade: false,
            reason: reason.into(),
            recommended_broker: None,
            max_lot_size: Decimal::ZERO,
            risk_score: Decimal::ONE_HUNDRED,
        }
    }
}

/// Per-broker slice of the distribution report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerSummary {
    pub balance: Decimal,
    pub equity: Decimal,
    pub risk_percent: Decimal,
    pub open_positions: usize,
    pub is_available: bool,
    pub free_margin: Decimal,
}

impl From<&BrokerStatus> for BrokerSummary {
    fn from(status: &BrokerStatus) -> Self {
        Self {
            balance: status.balance,
            equity: status.equity,
            risk_percent: status.risk_percent,
            open_positions: status.open_positions,
            is_available: status.is_available,
            free_margin: status.free_margin,
        }
    }
}

/// Aggregate view across every tracked broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_balance: Decimal,
    pub total_equity: Decimal,
    pub total_positions: usize,
    pub broker_count: usize,
    pub avg_risk_percent: Decimal,
}

/// Snapshot of how capital and risk are spread across brokers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerDistribution {
    pub brokers: BTreeMap<String, BrokerSummary>,
    pub summary: PortfolioSummary,
}
