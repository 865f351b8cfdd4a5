//! In-memory simulated venue.

use async_trait::async_trait;
use chrono::Utc;
use coinflow_core::error::GatewayError;
use coinflow_core::traits::ExchangeGateway;
use coinflow_core::types::{
    AccountType, Candle, Instrument, Interval, OrderKind, OrderReceipt, OrderRequest, Side, Ticker,
};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// A filled or canceled paper order, kept for inspection.
#[derive(Debug, Clone)]
pub struct PaperOrder {
    pub id: String,
    pub request: OrderRequest,
    pub fill_price: Decimal,
    pub canceled: bool,
}

#[derive(Default)]
struct PaperState {
    listing: HashMap<String, Instrument>,
    tickers: HashMap<String, Ticker>,
    candles: HashMap<String, Vec<Candle>>,
    balances: HashMap<String, Decimal>,
    orders: Vec<PaperOrder>,
}

/// Simulated venue that fills every order instantly against the seeded
/// top of book and mutates balances accordingly.
///
/// Market buys fill at the ask, market sells at the bid, limit orders at
/// their limit price. There is a single account bucket; the `AccountType`
/// argument is accepted and ignored.
#[derive(Default)]
pub struct PaperExchange {
    state: Mutex<PaperState>,
}

impl PaperExchange {
    /// Create an empty paper venue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an instrument listing entry.
    pub fn with_instrument(self, instrument: Instrument) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state
                .listing
                .insert(instrument.symbol.clone(), instrument);
        }
        self
    }

    /// Seed a ticker.
    pub fn with_ticker(self, symbol: impl Into<String>, ticker: Ticker) -> Self {
        self.state
            .lock()
            .unwrap()
            .tickers
            .insert(symbol.into(), ticker);
        self
    }

    /// Seed a candle history (oldest to newest).
    pub fn with_candles(self, symbol: impl Into<String>, candles: Vec<Candle>) -> Self {
        self.state
            .lock()
            .unwrap()
            .candles
            .insert(symbol.into(), candles);
        self
    }

    /// Seed a currency balance.
    pub fn with_balance(self, currency: impl Into<String>, amount: Decimal) -> Self {
        self.state
            .lock()
            .unwrap()
            .balances
            .insert(currency.into(), amount);
        self
    }

    /// Replace a ticker mid-run.
    pub fn set_ticker(&self, symbol: impl Into<String>, ticker: Ticker) {
        self.state
            .lock()
            .unwrap()
            .tickers
            .insert(symbol.into(), ticker);
    }

    /// Replace a balance mid-run.
    pub fn set_balance(&self, currency: impl Into<String>, amount: Decimal) {
        self.state
            .lock()
            .unwrap()
            .balances
            .insert(currency.into(), amount);
    }

    /// All orders seen so far.
    pub fn orders(&self) -> Vec<PaperOrder> {
        self.state.lock().unwrap().orders.clone()
    }

    fn fill_price(
        state: &PaperState,
        request: &OrderRequest,
    ) -> Result<Decimal, GatewayError> {
        match request.kind {
            OrderKind::Limit => request
                .price
                .ok_or_else(|| GatewayError::OrderRejected("limit order without price".into())),
            OrderKind::Market => {
                let ticker = state
                    .tickers
                    .get(&request.symbol)
                    .ok_or_else(|| GatewayError::SymbolNotFound(request.symbol.clone()))?;
                let price = match request.side {
                    Side::Buy => ticker.best_ask,
                    Side::Sell => ticker.best_bid,
                };
                Decimal::from_f64(price)
                    .filter(|p| *p > Decimal::ZERO)
                    .ok_or_else(|| {
                        GatewayError::OrderRejected(format!("no liquidity for {}", request.symbol))
                    })
            }
        }
    }
}

#[async_trait]
impl ExchangeGateway for PaperExchange {
    async fn listing_snapshot(&self) -> Result<HashMap<String, Instrument>, GatewayError> {
        Ok(self.state.lock().unwrap().listing.clone())
    }

    async fn ticker(&self, symbol: &str) -> Result<Ticker, GatewayError> {
        self.state
            .lock()
            .unwrap()
            .tickers
            .get(symbol)
            .copied()
            .ok_or_else(|| GatewayError::SymbolNotFound(symbol.to_string()))
    }

    async fn candles(
        &self,
        symbol: &str,
        _interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, GatewayError> {
        let state = self.state.lock().unwrap();
        let candles = state
            .candles
            .get(symbol)
            .ok_or_else(|| GatewayError::SymbolNotFound(symbol.to_string()))?;
        let start = candles.len().saturating_sub(limit);
        Ok(candles[start..].to_vec())
    }

    async fn balance(
        &self,
        _account: AccountType,
        currency: &str,
    ) -> Result<Decimal, GatewayError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .balances
            .get(currency)
            .copied()
            .unwrap_or(Decimal::ZERO))
    }

    async fn place_order(&self, request: OrderRequest) -> Result<OrderReceipt, GatewayError> {
        let mut state = self.state.lock().unwrap();

        let instrument = state
            .listing
            .get(&request.symbol)
            .cloned()
            .ok_or_else(|| GatewayError::SymbolNotFound(request.symbol.clone()))?;

        if request.size <= Decimal::ZERO {
            return Err(GatewayError::OrderRejected("non-positive size".into()));
        }

        let price = Self::fill_price(&state, &request)?;
        let notional = request.size * price;

        match request.side {
            Side::Buy => {
                let available = state
                    .balances
                    .get(&instrument.quote)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                if available < notional {
                    return Err(GatewayError::InsufficientFunds {
                        required: notional,
                        available,
                    });
                }
                *state.balances.entry(instrument.quote.clone()).or_default() -= notional;
                *state.balances.entry(instrument.base.clone()).or_default() += request.size;
            }
            Side::Sell => {
                let available = state
                    .balances
                    .get(&instrument.base)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                if available < request.size {
                    return Err(GatewayError::InsufficientFunds {
                        required: request.size,
                        available,
                    });
                }
                *state.balances.entry(instrument.base.clone()).or_default() -= request.size;
                *state.balances.entry(instrument.quote.clone()).or_default() += notional;
            }
        }

        let id = Uuid::new_v4().to_string();
        debug!(order_id = %id, symbol = %request.symbol, side = %request.side, size = %request.size, %price, "paper fill");
        state.orders.push(PaperOrder {
            id: id.clone(),
            request,
            fill_price: price,
            canceled: false,
        });

        Ok(OrderReceipt { order_id: id })
    }

    async fn cancel_order(&self, order_id: &str) -> Result<bool, GatewayError> {
        let mut state = self.state.lock().unwrap();
        match state.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                // Paper fills are instant, so a cancel only flags the record
                order.canceled = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn server_time(&self) -> Result<i64, GatewayError> {
        Ok(Utc::now().timestamp_millis())
    }

    fn name(&self) -> &str {
        "paper"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn venue() -> PaperExchange {
        PaperExchange::new()
            .with_instrument(Instrument::new(
                "BTC-USDT",
                dec!(0.1),
                dec!(0.00001),
                dec!(1),
            ))
            .with_ticker(
                "BTC-USDT",
                Ticker {
                    best_bid: 50_000.0,
                    best_ask: 50_100.0,
                    last: 50_050.0,
                },
            )
            .with_balance("USDT", dec!(10_000))
    }

    #[tokio::test]
    async fn test_market_buy_moves_balances() {
        let venue = venue();
        let receipt = venue
            .place_order(OrderRequest::market("BTC-USDT", Side::Buy, dec!(0.1)))
            .await
            .unwrap();
        assert!(!receipt.order_id.is_empty());

        // 0.1 * 50_100 ask = 5_010 spent
        let usdt = venue.balance(AccountType::Trade, "USDT").await.unwrap();
        let btc = venue.balance(AccountType::Trade, "BTC").await.unwrap();
        assert_eq!(usdt, dec!(4990));
        assert_eq!(btc, dec!(0.1));
    }

    #[tokio::test]
    async fn test_market_sell_moves_balances() {
        let venue = venue().with_balance("BTC", dec!(0.2));
        venue
            .place_order(OrderRequest::market("BTC-USDT", Side::Sell, dec!(0.2)))
            .await
            .unwrap();

        // 0.2 * 50_000 bid = 10_000 received
        let usdt = venue.balance(AccountType::Trade, "USDT").await.unwrap();
        let btc = venue.balance(AccountType::Trade, "BTC").await.unwrap();
        assert_eq!(usdt, dec!(20_000));
        assert_eq!(btc, dec!(0));
    }

    #[tokio::test]
    async fn test_buy_rejected_without_funds() {
        let venue = venue();
        let result = venue
            .place_order(OrderRequest::market("BTC-USDT", Side::Buy, dec!(1)))
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::InsufficientFunds { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_symbol_rejected() {
        let venue = venue();
        let result = venue
            .place_order(OrderRequest::market("DOGE-USDT", Side::Buy, dec!(1)))
            .await;
        assert!(matches!(result, Err(GatewayError::SymbolNotFound(_))));
    }

    #[tokio::test]
    async fn test_candles_respect_limit() {
        let candles: Vec<Candle> = (0..10)
            .map(|i| Candle::new(i, 1.0, 1.0, 1.0, 1.0, 1.0))
            .collect();
        let venue = venue().with_candles("BTC-USDT", candles);

        let out = venue.candles("BTC-USDT", Interval::Min15, 4).await.unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out[0].timestamp, 6);
    }

    #[tokio::test]
    async fn test_cancel_known_and_unknown() {
        let venue = venue();
        let receipt = venue
            .place_order(OrderRequest::market("BTC-USDT", Side::Buy, dec!(0.01)))
            .await
            .unwrap();
        assert!(venue.cancel_order(&receipt.order_id).await.unwrap());
        assert!(!venue.cancel_order("missing").await.unwrap());
    }
}
