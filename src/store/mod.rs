//! Trade persistence seam
//!
//! The trade store owns trade records; this crate reads open trades and
//! writes back stop-loss levels through this trait.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// An open trade as held by the trade store.
///
/// Only the fields this crate acts on are modeled here; the store may
/// carry more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    /// Trade identifier
    pub id: Uuid,
    /// Instrument the trade is in
    pub commodity: String,
    /// Trade direction
    pub side: TradeSide,
    /// Fill price at entry; absent while the order is still pending
    pub entry_price: Option<Decimal>,
    /// Protective stop, if one has been set
    pub stop_loss: Option<Decimal>,
    /// Profit target, if one has been set
    pub take_profit: Option<Decimal>,
}

impl Trade {
    /// Create an open trade with no stop or target attached yet.
    pub fn new(commodity: impl Into<String>, side: TradeSide, entry_price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            commodity: commodity.into(),
            side,
            entry_price: Some(entry_price),
            stop_loss: None,
            take_profit: None,
        }
    }

    /// Attach a stop-loss level.
    pub fn with_stop_loss(mut self, stop_loss: Decimal) -> Self {
        self.stop_loss = Some(stop_loss);
        self
    }

    /// Attach a take-profit level.
    pub fn with_take_profit(mut self, take_profit: Decimal) -> Self {
        self.take_profit = Some(take_profit);
        self
    }
}

/// Trait for trade store implementations.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Fetch all currently open trades.
    async fn open_trades(&self) -> anyhow::Result<Vec<Trade>>;
    /// Persist a new stop-loss level for a trade.
    async fn update_stop_loss(&self, trade_id: Uuid, stop_loss: Decimal) -> anyhow::Result<()>;
}
