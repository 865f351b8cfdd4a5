//! Core types and traits for the coinflow trading engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Candle, Ticker, Instrument)
//! - Order and position types
//! - The exchange gateway and notifier traits
//! - The shared error taxonomy

pub mod error;
pub mod traits;
pub mod types;

pub use error::{BotError, BotResult, GatewayError};
pub use traits::*;
pub use types::*;
