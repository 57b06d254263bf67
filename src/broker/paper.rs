//! In-memory broker connector for paper runs and tests

use super::{AccountInfo, BrokerConnector, BrokerPosition};
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct PaperAccount {
    info: AccountInfo,
    positions: Vec<BrokerPosition>,
    online: bool,
}

/// Scripted broker connector with settable account state per broker.
///
/// Brokers can be taken offline to exercise the unavailable-this-tick
/// path without a real connection.
#[derive(Default)]
pub struct PaperConnector {
    accounts: Arc<RwLock<HashMap<String, PaperAccount>>>,
}

impl PaperConnector {
    /// Create an empty paper connector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace the account snapshot for a broker.
    pub async fn set_account(&self, broker: &str, info: AccountInfo) {
        let mut accounts = self.accounts.write().await;
        let entry = accounts.entry(broker.to_string()).or_insert(PaperAccount {
            info: info.clone(),
            positions: vec![],
            online: true,
        });
        entry.info = info;
    }

    /// Replace the open positions reported for a broker.
    pub async fn set_positions(&self, broker: &str, positions: Vec<BrokerPosition>) {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.get_mut(broker) {
            account.positions = positions;
        }
    }

    /// Toggle broker availability.
    pub async fn set_online(&self, broker: &str, online: bool) {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.get_mut(broker) {
            account.online = online;
        }
    }
}

#[async_trait]
impl BrokerConnector for PaperConnector {
    async fn account_info(&self, broker: &str) -> anyhow::Result<AccountInfo> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(broker)
            .ok_or_else(|| anyhow!("unknown broker {broker}"))?;
        if !account.online {
            return Err(anyhow!("broker {broker} offline"));
        }
        Ok(account.info.clone())
    }

    async fn open_positions(&self, broker: &str) -> anyhow::Result<Vec<BrokerPosition>> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(broker)
            .ok_or_else(|| anyhow!("unknown broker {broker}"))?;
        if !account.online {
            return Err(anyhow!("broker {broker} offline"));
        }
        Ok(account.positions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_paper_connector_returns_account() {
        let connector = PaperConnector::new();
        connector
            .set_account("mt5", AccountInfo::new(dec!(10000), dec!(9900), dec!(500)))
            .await;

        let info = connector.account_info("mt5").await.unwrap();
        assert_eq!(info.balance, dec!(10000));
        assert_eq!(info.free_margin, dec!(9500));
    }

    #[tokio::test]
    async fn test_paper_connector_unknown_broker() {
        let connector = PaperConnector::new();
        assert!(connector.account_info("nope").await.is_err());
        assert!(connector.open_positions("nope").await.is_err());
    }

    #[tokio::test]
    async fn test_paper_connector_offline() {
        let connector = PaperConnector::new();
        connector
            .set_account("mt5", AccountInfo::new(dec!(1000), dec!(1000), dec!(0)))
            .await;
        connector.set_online("mt5", false).await;

        assert!(connector.account_info("mt5").await.is_err());

        connector.set_online("mt5", true).await;
        assert!(connector.account_info("mt5").await.is_ok());
    }

    #[tokio::test]
    async fn test_paper_connector_positions() {
        let connector = PaperConnector::new();
        connector
            .set_account("ctrader", AccountInfo::new(dec!(2000), dec!(2000), dec!(100)))
            .await;
        connector
            .set_positions(
                "ctrader",
                vec![BrokerPosition {
                    ticket: Uuid::new_v4(),
                    commodity: "GOLD".to_string(),
                    lot_size: dec!(0.10),
                }],
            )
            .await;

        let positions = connector.open_positions("ctrader").await.unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].commodity, "GOLD");
    }
}
