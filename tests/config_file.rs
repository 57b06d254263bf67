//! Configuration loading from disk and its effect on the gate

use std::io::Write;

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

use trade_guard::config::Config;
use trade_guard::hours::is_market_open;
use trade_guard::risk::DrawdownBaseline;

#[test]
fn test_load_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        [risk]
        max_drawdown_pct = 10
        drawdown_baseline = "peak_equity"

        [trailing]
        use_trailing_stop = true

        [market_hours.GOLD]
        calendar = "daily"
        days = ["mon", "tue", "wed", "thu", "fri"]
        open = "09:00"
        close = "17:00"

        [market_hours.BITCOIN]
        enabled = false
        calendar = "continuous"
    "#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.risk.max_drawdown_pct, dec!(10));
    assert_eq!(config.risk.drawdown_baseline, DrawdownBaseline::PeakEquity);
    assert!(config.trailing.use_trailing_stop);
    assert_eq!(config.trailing.trailing_stop_distance, dec!(1.5));

    let overrides = Some(&config.market_hours);

    // The GOLD override replaces the built-in 24/5 record: Wednesday 20:00
    // would be open under the default week but is outside the override window
    let wednesday_evening = Utc.with_ymd_and_hms(2025, 6, 11, 20, 0, 0).unwrap();
    assert!(!is_market_open("GOLD", overrides, wednesday_evening));
    let wednesday_noon = Utc.with_ymd_and_hms(2025, 6, 11, 12, 0, 0).unwrap();
    assert!(is_market_open("GOLD", overrides, wednesday_noon));

    // Disabled instruments are closed no matter the calendar
    assert!(!is_market_open("BITCOIN", overrides, wednesday_noon));

    // Instruments without an override keep their built-in hours
    assert!(is_market_open("EURUSD", overrides, wednesday_noon));
}
