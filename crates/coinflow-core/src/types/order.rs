//! Order request and receipt types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Get the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order kind. The engine only ever fires market and limit instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    /// Execute immediately at the best available price
    Market,
    /// Execute at the given price or better
    Limit,
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderKind::Market => write!(f, "MARKET"),
            OrderKind::Limit => write!(f, "LIMIT"),
        }
    }
}

/// Venue account bucket a balance lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Spot trading account
    Trade,
    /// Funding/main account
    Main,
}

/// A fire-and-forget order instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Pair symbol to trade
    pub symbol: String,
    /// Buy or sell
    pub side: Side,
    /// Market or limit
    pub kind: OrderKind,
    /// Quantity in base units
    pub size: Decimal,
    /// Limit price (limit orders only)
    pub price: Option<Decimal>,
}

impl OrderRequest {
    /// Create a market order request.
    pub fn market(symbol: impl Into<String>, side: Side, size: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            kind: OrderKind::Market,
            size,
            price: None,
        }
    }

    /// Create a limit order request.
    pub fn limit(symbol: impl Into<String>, side: Side, size: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            kind: OrderKind::Limit,
            size,
            price: Some(price),
        }
    }
}

/// Acknowledgement returned by the gateway for a placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Venue-assigned order id
    pub order_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_market_request() {
        let req = OrderRequest::market("BTC-USDT", Side::Buy, dec!(0.5));
        assert_eq!(req.kind, OrderKind::Market);
        assert_eq!(req.size, dec!(0.5));
        assert!(req.price.is_none());
    }

    #[test]
    fn test_limit_request() {
        let req = OrderRequest::limit("BTC-USDT", Side::Sell, dec!(0.5), dec!(65000));
        assert_eq!(req.kind, OrderKind::Limit);
        assert_eq!(req.price, Some(dec!(65000)));
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }
}
