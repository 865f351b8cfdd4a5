//! Open position tracking.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tracked long position in one instrument.
///
/// Positions live only in process memory. They are created when an entry
/// order is confirmed, or inferred when a non-zero base balance shows up
/// with no tracked position; they are removed on a confirmed full exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Pair symbol
    pub symbol: String,
    /// Entry price, approximated by the last trade at entry time
    pub entry_price: f64,
    /// Size in base units
    pub size: Decimal,
}

impl Position {
    /// Create a new position.
    pub fn new(symbol: impl Into<String>, entry_price: f64, size: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            entry_price,
            size,
        }
    }

    /// Position value at the given price, in quote units.
    pub fn value_at(&self, price: f64) -> f64 {
        self.size.to_f64().unwrap_or(0.0) * price
    }

    /// Unrealized return in percent at the given price.
    pub fn unrealized_pct(&self, price: f64) -> f64 {
        if self.entry_price <= 0.0 {
            return 0.0;
        }
        (price - self.entry_price) / self.entry_price * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_position_value() {
        let pos = Position::new("BTC-USDT", 100.0, dec!(2));
        assert!((pos.value_at(110.0) - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrealized_pct() {
        let pos = Position::new("BTC-USDT", 100.0, dec!(1));
        assert!((pos.unrealized_pct(101.5) - 1.5).abs() < 1e-9);
        assert!((pos.unrealized_pct(99.0) + 1.0).abs() < 1e-9);
    }
}
