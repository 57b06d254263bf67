//! In-memory trade store for paper runs and tests

use super::{Trade, TradeStore};
use anyhow::anyhow;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Trade store backed by a shared in-memory map.
#[derive(Default)]
pub struct MemoryStore {
    trades: Arc<RwLock<HashMap<Uuid, Trade>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a trade, replacing any existing record with the same id.
    pub async fn insert(&self, trade: Trade) {
        let mut trades = self.trades.write().await;
        trades.insert(trade.id, trade);
    }

    /// Look up a trade by id.
    pub async fn get(&self, trade_id: Uuid) -> Option<Trade> {
        let trades = self.trades.read().await;
        trades.get(&trade_id).cloned()
    }
}

#[async_trait]
impl TradeStore for MemoryStore {
    async fn open_trades(&self) -> anyhow::Result<Vec<Trade>> {
        let trades = self.trades.read().await;
        Ok(trades.values().cloned().collect())
    }

    async fn update_stop_loss(&self, trade_id: Uuid, stop_loss: Decimal) -> anyhow::Result<()> {
        let mut trades = self.trades.write().await;
        let trade = trades
            .get_mut(&trade_id)
            .ok_or_else(|| anyhow!("unknown trade {trade_id}"))?;
        trade.stop_loss = Some(stop_loss);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TradeSide;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let store = MemoryStore::new();
        let trade = Trade::new("WTI_CRUDE", TradeSide::Buy, dec!(78.50));
        let id = trade.id;
        store.insert(trade).await;

        let open = store.open_trades().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(store.get(id).await.unwrap().commodity, "WTI_CRUDE");
    }

    #[tokio::test]
    async fn test_update_stop_loss() {
        let store = MemoryStore::new();
        let trade = Trade::new("SILVER", TradeSide::Sell, dec!(29.10));
        let id = trade.id;
        store.insert(trade).await;

        store.update_stop_loss(id, dec!(29.50)).await.unwrap();
        assert_eq!(store.get(id).await.unwrap().stop_loss, Some(dec!(29.50)));
    }

    #[tokio::test]
    async fn test_update_unknown_trade_fails() {
        let store = MemoryStore::new();
        let result = store.update_stop_loss(Uuid::new_v4(), dec!(1)).await;
        assert!(result.is_err());
    }
}
