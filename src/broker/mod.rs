//! Broker connectivity seam
//!
//! Account snapshots and open-position queries for each connected broker.
//! Order placement itself belongs to the orchestrator's connector; this
//! crate only reads account state through this trait.

mod paper;

pub use paper::PaperConnector;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account snapshot for a single broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Account balance
    pub balance: Decimal,
    /// Current equity (balance plus floating P&L)
    pub equity: Decimal,
    /// Margin currently in use
    pub margin: Decimal,
    /// Margin still available for new positions
    pub free_margin: Decimal,
}

impl AccountInfo {
    /// Snapshot with free margin derived as balance minus used margin.
    pub fn new(balance: Decimal, equity: Decimal, margin: Decimal) -> Self {
        Self {
            balance,
            equity,
            margin,
            free_margin: balance - margin,
        }
    }
}

/// An open position as reported by a broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerPosition {
    /// Broker-side ticket for the position
    pub ticket: Uuid,
    /// Instrument the position is in
    pub commodity: String,
    /// Position size in lots
    pub lot_size: Decimal,
}

/// Trait for broker connector implementations.
///
/// A failed call means "this broker is unavailable this tick"; callers
/// skip the broker and keep whatever state they already hold.
#[async_trait]
pub trait BrokerConnector: Send + Sync {
    /// Fetch the current account snapshot for a broker.
    async fn account_info(&self, broker: &str) -> anyhow::Result<AccountInfo>;
    /// Fetch the open positions held at a broker.
    async fn open_positions(&self, broker: &str) -> anyhow::Result<Vec<BrokerPosition>>;
}
