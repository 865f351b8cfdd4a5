//! Exchange gateway trait definition.

use crate::error::GatewayError;
use crate::types::{AccountType, Candle, Instrument, Interval, OrderReceipt, OrderRequest, Ticker};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The capability contract the engine consumes from an exchange.
///
/// The engine never touches HTTP, authentication, or venue-specific retry
/// policy; implementations absorb those. All calls are awaited one at a
/// time by the single control loop.
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    /// Current listing of tradable instruments, keyed by symbol.
    async fn listing_snapshot(&self) -> Result<HashMap<String, Instrument>, GatewayError>;

    /// Top-of-book snapshot for one instrument.
    async fn ticker(&self, symbol: &str) -> Result<Ticker, GatewayError>;

    /// Candles for one instrument, ordered oldest to newest, at most
    /// `limit` entries.
    async fn candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, GatewayError>;

    /// Free balance of a currency in the given account bucket.
    async fn balance(&self, account: AccountType, currency: &str) -> Result<Decimal, GatewayError>;

    /// Submit an order. Fire-and-forget: the receipt only confirms
    /// acceptance, fills are not tracked.
    async fn place_order(&self, request: OrderRequest) -> Result<OrderReceipt, GatewayError>;

    /// Cancel an order. Returns false when the venue reports the cancel
    /// failed (already filled, unknown id).
    async fn cancel_order(&self, order_id: &str) -> Result<bool, GatewayError>;

    /// Venue clock in Unix milliseconds, for drift preflight checks.
    async fn server_time(&self) -> Result<i64, GatewayError>;

    /// Gateway name for logging.
    fn name(&self) -> &str;
}
