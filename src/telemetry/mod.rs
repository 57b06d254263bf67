//! Telemetry module
//!
//! Structured logging and metrics. The metrics facade records through the
//! `metrics` crate; installing an exporter is the orchestrator's job.

mod logging;
pub mod metrics;

pub use logging::init_logging;

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level)
}
