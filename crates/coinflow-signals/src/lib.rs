//! Directional decision logic for the trading engine.
//!
//! Two layers run per instrument per cycle:
//! - the [`SignalEnsemble`] combines three independent indicator votes
//!   (EMA cross, breakout, RSI mean-reversion) into one decision;
//! - the [`RegimeFilter`] gates entries to favorable macro conditions.
//!
//! Exits are never gated by the regime filter.

mod ensemble;
mod regime;

pub use ensemble::{tally, Direction, EnsembleConfig, Signal, SignalEnsemble, Vote};
pub use regime::{RegimeConfig, RegimeFilter};
