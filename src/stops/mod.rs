//! Protective stop management
//!
//! Trailing-stop tightening for open trades and the stop-loss/take-profit
//! trigger scan. Stops only ever move in the trade's favor; closing is left
//! to the orchestrator, which acts on the returned instructions.

mod trailing;
mod triggers;

pub use trailing::{trailed_stop, TrailingStopEngine};
pub use triggers::{check_stop_loss_triggers, CloseReason, TriggeredClose};
