//! Trailing stop updates

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::TrailingConfig;
use crate::store::{Trade, TradeSide, TradeStore};
use crate::telemetry::metrics;

/// Candidate trailing stop for a trade, or `None` when the current stop is
/// already at least as tight.
///
/// `distance` is a fraction of price (1.5% = 0.015). The candidate sits that
/// far below the price for BUY trades and above it for SELL trades, rounded
/// to cents. A BUY stop only ever rises and a SELL stop only ever falls; a
/// candidate equal to the current stop is not an improvement.
pub fn trailed_stop(
    side: TradeSide,
    price: Decimal,
    distance: Decimal,
    current_stop: Option<Decimal>,
) -> Option<Decimal> {
    let candidate = match side {
        TradeSide::Buy => price * (Decimal::ONE - distance),
        TradeSide::Sell => price * (Decimal::ONE + distance),
    }
    .round_dp(2);

    let improves = match (side, current_stop) {
        (_, None) => true,
        (TradeSide::Buy, Some(stop)) => candidate > stop,
        (TradeSide::Sell, Some(stop)) => candidate < stop,
    };

    improves.then_some(candidate)
}

/// Ratchets protective stops toward the market and persists the new levels.
pub struct TrailingStopEngine {
    store: Arc<dyn TradeStore>,
}

impl TrailingStopEngine {
    /// Create an engine writing through the given trade store.
    pub fn new(store: Arc<dyn TradeStore>) -> Self {
        Self { store }
    }

    /// Tighten stops for every open trade with a known price.
    ///
    /// Returns the number of trades whose stop was persisted. Trades without
    /// an entry price or a current price are skipped; a store failure on one
    /// trade is logged and does not stop the rest of the batch.
    pub async fn update_trailing_stops(
        &self,
        trades: &[Trade],
        current_prices: &HashMap<String, Decimal>,
        settings: &TrailingConfig,
    ) -> usize {
        if !settings.use_trailing_stop {
            return 0;
        }

        let distance = settings.trailing_stop_distance / Decimal::ONE_HUNDRED;
        let mut updated = 0;

        for trade in trades {
            let Some(&price) = current_prices.get(&trade.commodity) else {
                continue;
            };
            if trade.entry_price.is_none() {
                continue;
            }

            let Some(new_stop) = trailed_stop(trade.side, price, distance, trade.stop_loss) else {
                continue;
            };

            match self.store.update_stop_loss(trade.id, new_stop).await {
                Ok(()) => {
                    updated += 1;
                    info!(
                        trade_id = %trade.id,
                        commodity = %trade.commodity,
                        side = ?trade.side,
                        old_stop = ?trade.stop_loss,
                        %new_stop,
                        %price,
                        "trailing stop tightened"
                    );
                }
                Err(err) => {
                    warn!(
                        trade_id = %trade.id,
                        error = %err,
                        "failed to persist trailing stop, skipping trade"
                    );
                }
            }
        }

        if updated > 0 {
            metrics::record_trailing_updates(updated);
        }
        updated
    }
}
