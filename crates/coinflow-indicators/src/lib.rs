//! Technical indicators for the trading engine.
//!
//! This crate provides the indicator math the decision engine runs on:
//! - Exponential moving average (EMA)
//! - Wilder's relative strength index (RSI)
//! - Average directional index (ADX)
//! - Average true range as a percentage of price (ATR%)
//! - Bid/ask spread as a percentage of mid
//!
//! All functions are pure. Insufficient input yields an empty vector or
//! zero, never an error; callers turn that into a skip.

pub mod momentum;
pub mod moving_average;
pub mod trend;
pub mod volatility;

pub use momentum::Rsi;
pub use moving_average::Ema;
pub use trend::Adx;
pub use volatility::{spread_pct, AtrPercent, UNTRADEABLE_SPREAD};
