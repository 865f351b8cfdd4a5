//! Core data types for the trading engine.

mod candle;
mod instrument;
mod interval;
mod order;
mod position;

pub use candle::{closes, highs, lows, Candle};
pub use instrument::{Instrument, Ticker};
pub use interval::Interval;
pub use order::{AccountType, OrderKind, OrderReceipt, OrderRequest, Side};
pub use position::Position;
