//! Market-hours gate
//!
//! Pure per-instrument trading-window checks. Each instrument resolves to a
//! [`MarketHours`] record from the caller-supplied override map, falling back
//! to the built-in default table, and finally to an always-open record with a
//! warning. No state, no side effects beyond that warning.

mod defaults;

pub use defaults::default_market_hours;

use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Per-instrument override map.
///
/// An entry here replaces the **entire** built-in record for that instrument
/// key. Fields left out of an override do not fall back to the defaults; a
/// partial override is completed by serde defaults, not by the default table.
pub type HoursOverrides = HashMap<String, MarketHours>;

/// Trading-calendar shape for an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradingCalendar {
    /// Open around the clock, every day
    Continuous,
    /// Opens Sunday evening, closes Friday evening, dark on Saturday
    NearContinuous,
    /// Open during the daily window on the listed weekdays only
    Daily,
}

/// Trading-window record for a single instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketHours {
    /// Master switch; a disabled instrument is closed unconditionally
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Calendar shape
    pub calendar: TradingCalendar,
    /// Weekdays the daily window applies to; ignored by the other calendars
    #[serde(default = "weekdays_mon_fri", with = "weekday_names")]
    pub days: Vec<Weekday>,
    /// Opening time of day, UTC
    #[serde(default = "default_open", with = "hhmm")]
    pub open: NaiveTime,
    /// Closing time of day, UTC
    #[serde(default = "default_close", with = "hhmm")]
    pub close: NaiveTime,
}

impl MarketHours {
    /// A 24/7 record.
    pub fn continuous() -> Self {
        Self {
            enabled: true,
            calendar: TradingCalendar::Continuous,
            days: all_weekdays(),
            open: default_open(),
            close: default_close(),
        }
    }

    /// A 24/5 record opening Sunday at `open` and closing Friday at `close`.
    pub fn near_continuous(open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            enabled: true,
            calendar: TradingCalendar::NearContinuous,
            days: weekdays_mon_fri(),
            open,
            close,
        }
    }

    /// A bounded daily window on the given weekdays.
    pub fn daily(days: Vec<Weekday>, open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            enabled: true,
            calendar: TradingCalendar::Daily,
            days,
            open,
            close,
        }
    }

    /// Same record with trading switched off.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Check whether an instrument is tradable at `now`.
pub fn is_market_open(
    instrument: &str,
    overrides: Option<&HoursOverrides>,
    now: DateTime<Utc>,
) -> bool {
    open_at(&resolve(instrument, overrides), now)
}

/// Check whether an instrument is tradable at the current UTC time.
pub fn is_market_open_now(instrument: &str, overrides: Option<&HoursOverrides>) -> bool {
    is_market_open(instrument, overrides, Utc::now())
}

/// Resolve the hours record for an instrument: overrides, then the built-in
/// table, then an always-open fallback.
fn resolve(instrument: &str, overrides: Option<&HoursOverrides>) -> MarketHours {
    if let Some(hours) = overrides.and_then(|map| map.get(instrument)) {
        return hours.clone();
    }
    if let Some(hours) = default_market_hours().get(instrument) {
        return hours.clone();
    }
    warn!(instrument, "no trading hours configured, treating as always open");
    MarketHours::continuous()
}

fn open_at(hours: &MarketHours, now: DateTime<Utc>) -> bool {
    if !hours.enabled {
        return false;
    }

    let weekday = now.weekday();
    let time = now.time();

    match hours.calendar {
        TradingCalendar::Continuous => true,
        TradingCalendar::NearContinuous => match weekday {
            Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => true,
            Weekday::Sun => time >= hours.open,
            Weekday::Fri => time <= hours.close,
            Weekday::Sat => false,
        },
        TradingCalendar::Daily => {
            hours.days.contains(&weekday) && time >= hours.open && time <= hours.close
        }
    }
}

pub(crate) fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn default_enabled() -> bool {
    true
}

fn default_open() -> NaiveTime {
    NaiveTime::MIN
}

fn default_close() -> NaiveTime {
    hm(23, 59)
}

fn weekdays_mon_fri() -> Vec<Weekday> {
    vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
}

fn all_weekdays() -> Vec<Weekday> {
    vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
}

/// `"HH:MM"` wire format for times of day.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
    }
}

/// Lowercase short weekday names (`"mon"`..`"sun"`) for weekday sets.
mod weekday_names {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    fn short_name(day: Weekday) -> &'static str {
        match day {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
            Weekday::Sun => "sun",
        }
    }

    pub fn serialize<S: Serializer>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error> {
        days.iter()
            .map(|day| short_name(*day))
            .collect::<Vec<_>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Weekday>, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        names
            .iter()
            .map(|name| {
                name.parse::<Weekday>()
                    .map_err(|_| serde::de::Error::custom(format!("invalid weekday: {name}")))
            })
            .collect()
    }
}
