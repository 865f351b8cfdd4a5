//! Volatility and liquidity indicators.

use coinflow_core::traits::CandleIndicator;
use coinflow_core::types::Candle;

/// Sentinel spread returned for a non-positive bid or ask. Any sane
/// maximum-spread gate rejects it.
pub const UNTRADEABLE_SPREAD: f64 = 10_000.0;

/// Average True Range over the trailing period, as a percentage of the
/// latest close.
///
/// A plain mean of the last `period` true ranges; the engine uses this as
/// a volatility floor, not for stop placement, so Wilder smoothing is not
/// applied here.
#[derive(Debug, Clone)]
pub struct AtrPercent {
    period: usize,
}

impl AtrPercent {
    /// Create a new ATR% indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl CandleIndicator for AtrPercent {
    fn calculate(&self, candles: &[Candle]) -> f64 {
        if self.period == 0 || candles.len() < self.period + 1 {
            return 0.0;
        }

        let mut trs = Vec::with_capacity(candles.len() - 1);
        for i in 1..candles.len() {
            trs.push(candles[i].true_range(Some(candles[i - 1].close)));
        }

        let tail = &trs[trs.len() - self.period..];
        let avg_tr: f64 = tail.iter().sum::<f64>() / self.period as f64;

        let last_close = candles[candles.len() - 1].close;
        if last_close > 0.0 {
            avg_tr / last_close * 100.0
        } else {
            0.0
        }
    }

    fn min_candles(&self) -> usize {
        self.period + 1
    }

    fn name(&self) -> &str {
        "ATR%"
    }
}

/// Bid/ask spread as a percentage of the mid price.
///
/// Non-positive quotes signal an untradeable book and return the sentinel.
pub fn spread_pct(best_bid: f64, best_ask: f64) -> f64 {
    if best_bid <= 0.0 || best_ask <= 0.0 {
        return UNTRADEABLE_SPREAD;
    }
    let mid = (best_bid + best_ask) / 2.0;
    (best_ask - best_bid) / mid * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles_with_range(n: usize, range: f64) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                Candle::new(
                    i as i64 * 900_000,
                    100.0,
                    100.0 + range / 2.0,
                    100.0 - range / 2.0,
                    100.0,
                    1000.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_atr_pct_insufficient_history_is_zero() {
        let atr = AtrPercent::new(14);
        assert_eq!(atr.calculate(&candles_with_range(14, 2.0)), 0.0);
        assert_eq!(atr.calculate(&[]), 0.0);
    }

    #[test]
    fn test_atr_pct_constant_range() {
        let atr = AtrPercent::new(14);
        // Range 2.0 on a 100 close = 2% ATR
        let value = atr.calculate(&candles_with_range(30, 2.0));
        assert!((value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_spread_pct() {
        // (101 - 99) / 100 * 100 = 2%
        assert!((spread_pct(99.0, 101.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_spread_pct_sentinel_on_bad_book() {
        assert_eq!(spread_pct(0.0, 101.0), UNTRADEABLE_SPREAD);
        assert_eq!(spread_pct(99.0, 0.0), UNTRADEABLE_SPREAD);
        assert_eq!(spread_pct(-1.0, -1.0), UNTRADEABLE_SPREAD);
    }
}
