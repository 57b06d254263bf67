//! Broker book and trade assessment

use futures_util::future::join_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{
    broker_preference, composite_risk_score, drawdown_pct, max_lot_size, BrokerDistribution,
    BrokerStatus, BrokerSummary, DrawdownBaseline, PortfolioSummary, RefreshError, RiskAssessment,
    RiskLimits,
};
use crate::broker::BrokerConnector;
use crate::store::TradeSide;
use crate::telemetry::metrics;

/// Composite score at and above which a trade is refused outright.
const SCORE_DENY_THRESHOLD: Decimal = dec!(80);

#[derive(Default)]
struct BrokerBook {
    statuses: BTreeMap<String, BrokerStatus>,
    baselines: BTreeMap<String, Decimal>,
}

impl BrokerBook {
    fn observe(&mut self, status: &BrokerStatus, policy: DrawdownBaseline) {
        let baseline = self
            .baselines
            .entry(status.name.clone())
            .or_insert(match policy {
                DrawdownBaseline::InitialBalance => status.balance,
                DrawdownBaseline::PeakEquity => status.equity,
            });
        if policy == DrawdownBaseline::PeakEquity && status.equity > *baseline {
            *baseline = status.equity;
        }
    }

    fn drawdown(&self, status: &BrokerStatus) -> Decimal {
        let baseline = self
            .baselines
            .get(&status.name)
            .copied()
            .unwrap_or(status.equity);
        drawdown_pct(baseline, status.equity)
    }
}

/// Central risk authority across all connected brokers.
///
/// Holds the broker book (latest status per broker plus the drawdown
/// baseline) and answers, per proposed trade, whether it may be placed,
/// where, and at what maximum size. One instance is constructed by the
/// orchestrator and shared; there is no process-wide singleton.
pub struct RiskManager {
    connector: Arc<dyn BrokerConnector>,
    limits: RiskLimits,
    book: RwLock<BrokerBook>,
}

impl RiskManager {
    /// Create a risk manager over a broker connector.
    pub fn new(connector: Arc<dyn BrokerConnector>, limits: RiskLimits) -> Self {
        Self {
            connector,
            limits,
            book: RwLock::new(BrokerBook::default()),
        }
    }

    /// The configured limits.
    pub fn limits(&self) -> &RiskLimits {
        &self.limits
    }

    /// Refresh one broker from the connector.
    ///
    /// On failure the previous status (if any) stays in the book untouched;
    /// stale data beats no data for the rest of the tick.
    pub async fn refresh_broker(&self, name: &str) -> Result<BrokerStatus, RefreshError> {
        let info = match self.connector.account_info(name).await {
            Ok(info) => info,
            Err(err) => {
                warn!(broker = name, error = %err, "account info unavailable, keeping stale status");
                return Err(RefreshError::AccountInfo {
                    broker: name.to_string(),
                    reason: err.to_string(),
                });
            }
        };

        let positions = match self.connector.open_positions(name).await {
            Ok(positions) => positions,
            Err(err) => {
                warn!(broker = name, error = %err, "open positions unavailable, keeping stale status");
                return Err(RefreshError::Positions {
                    broker: name.to_string(),
                    reason: err.to_string(),
                });
            }
        };

        let status = BrokerStatus::from_account(
            name,
            &info,
            positions.len(),
            self.limits.max_portfolio_risk_pct,
        );

        let mut book = self.book.write().await;
        book.observe(&status, self.limits.drawdown_baseline);
        metrics::record_broker_status(&status, book.drawdown(&status));
        book.statuses.insert(name.to_string(), status.clone());
        Ok(status)
    }

    /// Refresh every named broker, one round-trip per broker, concurrently.
    ///
    /// Returns the per-broker outcome of this round; brokers refreshed on
    /// earlier ticks remain in the book and are visible via [`statuses`].
    ///
    /// [`statuses`]: RiskManager::statuses
    pub async fn refresh_all(
        &self,
        names: &[String],
    ) -> BTreeMap<String, Result<BrokerStatus, RefreshError>> {
        let outcomes = join_all(names.iter().map(|name| async move {
            (name.clone(), self.refresh_broker(name).await)
        }))
        .await;

        outcomes.into_iter().collect()
    }

    /// Snapshot of the full broker book.
    pub async fn statuses(&self) -> BTreeMap<String, BrokerStatus> {
        self.book.read().await.statuses.clone()
    }

    /// Assess a proposed trade and pick the broker that should take it.
    ///
    /// Refreshes the named brokers first, then evaluates against the whole
    /// book. The book's write lock is held from broker selection through the
    /// final decision so concurrent assessments cannot size against the same
    /// risk budget.
    pub async fn assess_trade(
        &self,
        instrument: &str,
        side: TradeSide,
        requested_lot: Decimal,
        price: Decimal,
        brokers: &[String],
    ) -> RiskAssessment {
        self.refresh_all(brokers).await;

        let book = self.book.write().await;

        let candidates: Vec<&BrokerStatus> = book
            .statuses
            .values()
            .filter(|status| status.is_available && status.free_margin > Decimal::ZERO)
            .collect();

        let Some(first) = candidates.first() else {
            info!(instrument, ?side, "trade denied, no broker below the risk ceiling");
            return RiskAssessment::denied("all brokers at risk ceiling");
        };

        // Book iteration is name-ordered; keeping the first strictly-best
        // candidate makes score ties resolve to the smallest broker name.
        let mut best = *first;
        let mut best_score = broker_preference(best);
        for candidate in candidates.iter().skip(1).copied() {
            let score = broker_preference(candidate);
            if score > best_score {
                best = candidate;
                best_score = score;
            }
        }

        let max_lot = max_lot_size(best, &self.limits);

        let drawdown = book.drawdown(best);
        if drawdown > self.limits.max_drawdown_pct {
            warn!(
                broker = %best.name,
                drawdown = %drawdown.round_dp(1),
                "trade denied, drawdown limit breached"
            );
            return RiskAssessment {
                can_trade: false,
                reason: format!(
                    "drawdown {}% exceeds max {}%",
                    drawdown.round_dp(1),
                    self.limits.max_drawdown_pct
                ),
                recommended_broker: Some(best.name.clone()),
                max_lot_size: Decimal::ZERO,
                risk_score: Decimal::ONE_HUNDRED,
            };
        }

        let risk_score = composite_risk_score(best, requested_lot, max_lot, &self.limits);

        let can_trade = requested_lot <= max_lot
            && best.risk_percent < self.limits.max_portfolio_risk_pct
            && risk_score < SCORE_DENY_THRESHOLD;

        let reason = if can_trade {
            "trade admitted".to_string()
        } else if requested_lot > max_lot {
            format!("requested {requested_lot} lots exceeds max {max_lot}")
        } else if best.risk_percent >= self.limits.max_portfolio_risk_pct {
            format!("{} at risk ceiling", best.name)
        } else {
            format!("risk score {} too high", risk_score.round_dp(0))
        };

        info!(
            instrument,
            ?side,
            %price,
            broker = %best.name,
            %requested_lot,
            %max_lot,
            risk_score = %risk_score.round_dp(1),
            can_trade,
            "trade assessed"
        );

        RiskAssessment {
            can_trade,
            reason,
            recommended_broker: Some(best.name.clone()),
            max_lot_size: max_lot,
            risk_score,
        }
    }

    /// Current capital and risk distribution across all tracked brokers.
    ///
    /// Read-only; does not trigger a refresh.
    pub async fn distribution(&self) -> BrokerDistribution {
        let book = self.book.read().await;

        let mut brokers = BTreeMap::new();
        let mut total_balance = Decimal::ZERO;
        let mut total_equity = Decimal::ZERO;
        let mut total_positions = 0usize;
        let mut risk_sum = Decimal::ZERO;

        for (name, status) in &book.statuses {
            total_balance += status.balance;
            total_equity += status.equity;
            total_positions += status.open_positions;
            risk_sum += status.risk_percent;
            brokers.insert(name.clone(), BrokerSummary::from(status));
        }

        let broker_count = book.statuses.len();
        let avg_risk_percent = if broker_count == 0 {
            Decimal::ZERO
        } else {
            risk_sum / Decimal::from(broker_count)
        };

        BrokerDistribution {
            brokers,
            summary: PortfolioSummary {
                total_balance,
                total_equity,
                total_positions,
                broker_count,
                avg_risk_percent,
            },
        }
    }
}
