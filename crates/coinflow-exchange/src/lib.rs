//! Exchange gateway implementations.
//!
//! The engine consumes the [`coinflow_core::ExchangeGateway`] trait; this
//! crate provides:
//! - [`PaperExchange`]: an in-memory simulated venue with seedable
//!   listings, tickers, candles, and balances;
//! - [`DryRunGateway`]: a decorator that passes reads through and turns
//!   writes into logged no-ops;
//! - [`RetryPolicy`]: bounded-attempt exponential backoff wrapped around
//!   order placement.

mod dry_run;
mod paper;
mod retry;

pub use dry_run::DryRunGateway;
pub use paper::PaperExchange;
pub use retry::RetryPolicy;
