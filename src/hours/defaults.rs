//! Built-in trading-hours table
//!
//! Covers the instruments the bot trades out of the box. Metals, energy and
//! forex majors run 24/5 from Sunday 22:00 to Friday 21:00 UTC; the
//! agriculturals keep exchange hours; crypto never closes.

use super::{hm, MarketHours};
use chrono::Weekday;
use std::collections::HashMap;
use std::sync::OnceLock;

const ROUND_THE_WEEK: &[&str] = &[
    "GOLD",
    "SILVER",
    "PLATINUM",
    "PALLADIUM",
    "WTI_CRUDE",
    "BRENT_CRUDE",
    "NATURAL_GAS",
    "COPPER",
    "EURUSD",
    "GBPUSD",
    "USDJPY",
];

const EXCHANGE_TRADED: &[&str] = &["WHEAT", "CORN", "SOYBEANS", "COFFEE", "SUGAR", "COCOA"];

const ALWAYS_ON: &[&str] = &["BITCOIN", "ETHEREUM"];

static DEFAULTS: OnceLock<HashMap<String, MarketHours>> = OnceLock::new();

/// The built-in per-instrument hours table.
pub fn default_market_hours() -> &'static HashMap<String, MarketHours> {
    DEFAULTS.get_or_init(build_table)
}

fn build_table() -> HashMap<String, MarketHours> {
    let mut table = HashMap::new();

    let near_continuous = MarketHours::near_continuous(hm(22, 0), hm(21, 0));
    for id in ROUND_THE_WEEK {
        table.insert(id.to_string(), near_continuous.clone());
    }

    let exchange_hours = MarketHours::daily(
        vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ],
        hm(8, 30),
        hm(20, 0),
    );
    for id in EXCHANGE_TRADED {
        table.insert(id.to_string(), exchange_hours.clone());
    }

    for id in ALWAYS_ON {
        table.insert(id.to_string(), MarketHours::continuous());
    }

    table
}
