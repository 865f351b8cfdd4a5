//! Dry-run gateway decorator.

use async_trait::async_trait;
use coinflow_core::error::GatewayError;
use coinflow_core::traits::ExchangeGateway;
use coinflow_core::types::{
    AccountType, Candle, Instrument, Interval, OrderReceipt, OrderRequest, Ticker,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::info;

/// Wraps a gateway so that reads pass through and writes never touch the
/// venue.
///
/// Order placement and cancellation are logged and acknowledged with a
/// synthetic receipt, matching live log shape so a dry session reads like
/// a real one.
pub struct DryRunGateway<G> {
    inner: G,
}

impl<G> DryRunGateway<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    /// Unwrap the inner gateway.
    pub fn into_inner(self) -> G {
        self.inner
    }
}

#[async_trait]
impl<G: ExchangeGateway> ExchangeGateway for DryRunGateway<G> {
    async fn listing_snapshot(&self) -> Result<HashMap<String, Instrument>, GatewayError> {
        self.inner.listing_snapshot().await
    }

    async fn ticker(&self, symbol: &str) -> Result<Ticker, GatewayError> {
        self.inner.ticker(symbol).await
    }

    async fn candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, GatewayError> {
        self.inner.candles(symbol, interval, limit).await
    }

    async fn balance(&self, account: AccountType, currency: &str) -> Result<Decimal, GatewayError> {
        self.inner.balance(account, currency).await
    }

    async fn place_order(&self, request: OrderRequest) -> Result<OrderReceipt, GatewayError> {
        info!(
            symbol = %request.symbol,
            side = %request.side,
            kind = %request.kind,
            size = %request.size,
            price = ?request.price,
            "[dry-run] place_order"
        );
        Ok(OrderReceipt {
            order_id: "DRYRUN".to_string(),
        })
    }

    async fn cancel_order(&self, order_id: &str) -> Result<bool, GatewayError> {
        info!(%order_id, "[dry-run] cancel_order");
        Ok(true)
    }

    async fn server_time(&self) -> Result<i64, GatewayError> {
        self.inner.server_time().await
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}
