//! Metrics facade
//!
//! Gauges track per-broker account health; counters track protective-stop
//! activity. Names are stable so dashboards can rely on them.

use metrics::{counter, gauge};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::risk::BrokerStatus;

/// Record the per-broker gauges from a fresh status snapshot.
pub fn record_broker_status(status: &BrokerStatus, drawdown_pct: Decimal) {
    let broker = status.name.clone();
    gauge!("tradeguard_broker_balance_usd", "broker" => broker.clone()).set(as_f64(status.balance));
    gauge!("tradeguard_broker_equity_usd", "broker" => broker.clone()).set(as_f64(status.equity));
    gauge!("tradeguard_broker_free_margin_usd", "broker" => broker.clone())
        .set(as_f64(status.free_margin));
    gauge!("tradeguard_broker_risk_pct", "broker" => broker.clone())
        .set(as_f64(status.risk_percent));
    gauge!("tradeguard_broker_open_positions", "broker" => broker.clone())
        .set(status.open_positions as f64);
    gauge!("tradeguard_broker_drawdown_pct", "broker" => broker).set(as_f64(drawdown_pct));
}

/// Count trailing stops persisted this tick.
pub fn record_trailing_updates(count: usize) {
    counter!("tradeguard_trailing_stops_updated_total").increment(count as u64);
}

/// Count closure instructions produced this tick.
pub fn record_triggered_closes(count: usize) {
    counter!("tradeguard_stop_triggers_total").increment(count as u64);
}

fn as_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
