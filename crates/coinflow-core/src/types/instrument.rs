//! Instrument metadata and ticker snapshots.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tradable spot pair with its venue quantization rules.
///
/// The symbol is always "BASE-QUOTE". Metadata is refreshed from the
/// gateway's listing snapshot each cycle and treated as immutable within
/// a cycle. Any order quantity must be an integer multiple of
/// `base_increment`, and its notional value must reach `min_funds` when
/// that is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Pair symbol, e.g. "BTC-USDT"
    pub symbol: String,
    /// Base currency (the asset being bought or sold)
    pub base: String,
    /// Quote currency (the settlement currency)
    pub quote: String,
    /// Minimum price step
    pub price_increment: Decimal,
    /// Minimum quantity step
    pub base_increment: Decimal,
    /// Minimum order notional in quote units (0 = no minimum)
    pub min_funds: Decimal,
}

impl Instrument {
    /// Create an instrument from a "BASE-QUOTE" symbol.
    pub fn new(
        symbol: impl Into<String>,
        price_increment: Decimal,
        base_increment: Decimal,
        min_funds: Decimal,
    ) -> Self {
        let symbol = symbol.into();
        let (base, quote) = split_symbol(&symbol);
        Self {
            symbol,
            base,
            quote,
            price_increment,
            base_increment,
            min_funds,
        }
    }

    /// Floor a quantity to an integer multiple of the base increment.
    pub fn snap_quantity(&self, quantity: Decimal) -> Decimal {
        if self.base_increment <= Decimal::ZERO {
            return quantity;
        }
        (quantity / self.base_increment).floor() * self.base_increment
    }
}

/// Split a "BASE-QUOTE" symbol into its currencies.
///
/// A symbol without a separator yields an empty quote; callers treat such
/// instruments as unroutable rather than erroring.
pub(crate) fn split_symbol(symbol: &str) -> (String, String) {
    match symbol.split_once('-') {
        Some((base, quote)) => (base.to_string(), quote.to_string()),
        None => (symbol.to_string(), String::new()),
    }
}

/// A top-of-book snapshot for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    /// Best bid price
    pub best_bid: f64,
    /// Best ask price
    pub best_ask: f64,
    /// Last traded price
    pub last: f64,
}

impl Ticker {
    /// Mid price between best bid and ask.
    pub fn mid(&self) -> f64 {
        (self.best_bid + self.best_ask) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_instrument_split() {
        let inst = Instrument::new("ETH-BTC", dec!(0.000001), dec!(0.0001), dec!(0.00001));
        assert_eq!(inst.base, "ETH");
        assert_eq!(inst.quote, "BTC");
    }

    #[test]
    fn test_snap_quantity_floors_to_step() {
        let inst = Instrument::new("BTC-USDT", dec!(0.1), dec!(0.01), dec!(0));
        assert_eq!(inst.snap_quantity(dec!(0.379)), dec!(0.37));
        assert_eq!(inst.snap_quantity(dec!(0.005)), dec!(0.00));
    }

    #[test]
    fn test_ticker_mid() {
        let ticker = Ticker {
            best_bid: 99.0,
            best_ask: 101.0,
            last: 100.0,
        };
        assert!((ticker.mid() - 100.0).abs() < 1e-9);
    }
}
