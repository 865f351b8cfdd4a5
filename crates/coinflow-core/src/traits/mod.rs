//! Core traits for the trading engine.

mod gateway;
mod indicator;
mod notifier;

pub use gateway::ExchangeGateway;
pub use indicator::{CandleIndicator, Indicator};
pub use notifier::Notifier;
