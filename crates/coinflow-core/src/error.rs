//! Error types for the trading engine.

use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level engine error.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors surfaced by the exchange gateway.
///
/// Data-insufficiency conditions (short candle history, zero ATR) are not
/// errors anywhere in the engine; they are ordinary skip outcomes. Gateway
/// errors cover the venue side only.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Order rejected: {0}")]
    OrderRejected(String),

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Rate limited: retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),
}

/// Result type alias for engine operations.
pub type BotResult<T> = Result<T, BotError>;
