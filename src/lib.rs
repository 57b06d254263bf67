//! trade-guard: risk and execution control core for a multi-broker trading bot
//!
//! This library provides the safety layer an orchestrator consults on every
//! control-loop tick:
//! - Market-hours gate: is this instrument tradable right now?
//! - Risk manager: which broker should take a trade, at what maximum size,
//!   and may it be placed at all?
//! - Trailing stop engine: ratchet protective stops and report positions
//!   due for closure
//! - Collaborator seams for broker connectivity and trade persistence
//! - Configuration and observability plumbing
//!
//! Market data acquisition, order routing and storage live outside this
//! crate, behind the `broker` and `store` traits.

pub mod broker;
pub mod config;
pub mod hours;
pub mod risk;
pub mod stops;
pub mod store;
pub mod telemetry;
