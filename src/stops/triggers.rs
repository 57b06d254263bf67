//! Stop-loss and take-profit trigger scan

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::store::{Trade, TradeSide};
use crate::telemetry::metrics;

/// Why a trade is due for closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloseReason {
    StopLoss,
    TakeProfit,
}

/// Instruction to close a trade, produced by the trigger scan and acted on
/// by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggeredClose {
    pub trade_id: Uuid,
    pub reason: CloseReason,
    pub exit_price: Decimal,
}

/// Scan open trades for breached stop or profit levels.
///
/// BUY trades stop out when the price falls to the stop and take profit when
/// it reaches the target; SELL trades mirror both. The stop-loss check runs
/// first and the trade is presumed closed on the first match, so a trade
/// yields at most one instruction per scan even when both levels are
/// breached. Trades without a current price are skipped. Nothing is closed
/// or mutated here.
pub fn check_stop_loss_triggers(
    trades: &[Trade],
    current_prices: &HashMap<String, Decimal>,
) -> Vec<TriggeredClose> {
    let mut closures = Vec::new();

    for trade in trades {
        let Some(&price) = current_prices.get(&trade.commodity) else {
            continue;
        };

        if let Some(stop) = trade.stop_loss {
            let breached = match trade.side {
                TradeSide::Buy => price <= stop,
                TradeSide::Sell => price >= stop,
            };
            if breached {
                info!(
                    trade_id = %trade.id,
                    commodity = %trade.commodity,
                    side = ?trade.side,
                    %stop,
                    %price,
                    "stop loss triggered"
                );
                closures.push(TriggeredClose {
                    trade_id: trade.id,
                    reason: CloseReason::StopLoss,
                    exit_price: price,
                });
                continue;
            }
        }

        if let Some(target) = trade.take_profit {
            let reached = match trade.side {
                TradeSide::Buy => price >= target,
                TradeSide::Sell => price <= target,
            };
            if reached {
                info!(
                    trade_id = %trade.id,
                    commodity = %trade.commodity,
                    side = ?trade.side,
                    %target,
                    %price,
                    "take profit triggered"
                );
                closures.push(TriggeredClose {
                    trade_id: trade.id,
                    reason: CloseReason::TakeProfit,
                    exit_price: price,
                });
            }
        }
    }

    if !closures.is_empty() {
        metrics::record_triggered_closes(closures.len());
    }
    closures
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn prices(pairs: &[(&str, Decimal)]) -> HashMap<String, Decimal> {
        pairs
            .iter()
            .map(|(commodity, price)| (commodity.to_string(), *price))
            .collect()
    }

    #[test]
    fn test_buy_stop_loss_on_fall() {
        let trade = Trade::new("GOLD", TradeSide::Buy, dec!(100)).with_stop_loss(dec!(95));

        let hits = check_stop_loss_triggers(&[trade.clone()], &prices(&[("GOLD", dec!(94.5))]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].reason, CloseReason::StopLoss);
        assert_eq!(hits[0].exit_price, dec!(94.5));
        assert_eq!(hits[0].trade_id, trade.id);
    }

    #[test]
    fn test_buy_stop_loss_inclusive_at_level() {
        let trade = Trade::new("GOLD", TradeSide::Buy, dec!(100)).with_stop_loss(dec!(95));
        let hits = check_stop_loss_triggers(&[trade], &prices(&[("GOLD", dec!(95))]));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_sell_stop_loss_on_rise() {
        // SELL with stop 50: price 51 stops out at 51
        let trade = Trade::new("SILVER", TradeSide::Sell, dec!(48)).with_stop_loss(dec!(50));

        let hits = check_stop_loss_triggers(&[trade], &prices(&[("SILVER", dec!(51))]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].reason, CloseReason::StopLoss);
        assert_eq!(hits[0].exit_price, dec!(51));
    }

    #[test]
    fn test_buy_take_profit() {
        let trade = Trade::new("GOLD", TradeSide::Buy, dec!(100)).with_take_profit(dec!(110));

        let hits = check_stop_loss_triggers(&[trade], &prices(&[("GOLD", dec!(111))]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].reason, CloseReason::TakeProfit);
    }

    #[test]
    fn test_sell_take_profit() {
        let trade = Trade::new("SILVER", TradeSide::Sell, dec!(48)).with_take_profit(dec!(45));

        let hits = check_stop_loss_triggers(&[trade], &prices(&[("SILVER", dec!(44.9))]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].reason, CloseReason::TakeProfit);
    }

    #[test]
    fn test_no_trigger_inside_band() {
        let trade = Trade::new("GOLD", TradeSide::Buy, dec!(100))
            .with_stop_loss(dec!(95))
            .with_take_profit(dec!(110));

        let hits = check_stop_loss_triggers(&[trade], &prices(&[("GOLD", dec!(102))]));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_stop_loss_wins_when_both_breached() {
        // Inverted levels: price 90 is below the stop and above the target
        // would-be band; stop-loss is checked first and wins
        let trade = Trade::new("GOLD", TradeSide::Buy, dec!(100))
            .with_stop_loss(dec!(95))
            .with_take_profit(dec!(85));

        let hits = check_stop_loss_triggers(&[trade], &prices(&[("GOLD", dec!(90))]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].reason, CloseReason::StopLoss);
    }

    #[test]
    fn test_unpriced_trade_skipped() {
        let trade = Trade::new("COCOA", TradeSide::Buy, dec!(100)).with_stop_loss(dec!(95));
        let hits = check_stop_loss_triggers(&[trade], &prices(&[("GOLD", dec!(90))]));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_trade_without_levels_never_triggers() {
        let trade = Trade::new("GOLD", TradeSide::Buy, dec!(100));
        let hits = check_stop_loss_triggers(&[trade], &prices(&[("GOLD", dec!(1))]));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_close_reason_wire_format() {
        assert_eq!(
            serde_json::to_string(&CloseReason::StopLoss).unwrap(),
            "\"STOP_LOSS\""
        );
        assert_eq!(
            serde_json::to_string(&CloseReason::TakeProfit).unwrap(),
            "\"TAKE_PROFIT\""
        );
    }
}
