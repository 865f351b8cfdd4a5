//! Risk management for the trading engine.
//!
//! Provides order sizing under venue quantization rules, entry admission
//! gates, and the take-profit/stop-loss exit rule.

mod exits;
mod gates;
mod sizing;

pub use exits::{ExitReason, ExitRule};
pub use gates::{allocation_pct, AdmissionGates, EntryContext, GateCheck};
pub use sizing::{OrderSizer, SizingMethod};
