//! Macro regime filter.

use coinflow_core::traits::{CandleIndicator, Indicator};
use coinflow_core::types::{closes, Candle};
use coinflow_indicators::{Adx, Ema};
use serde::{Deserialize, Serialize};

/// Configuration for the regime filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeConfig {
    /// Long trend EMA period
    pub trend_ema_period: usize,
    /// ADX period for trend strength
    pub adx_period: usize,
    /// Minimum ADX for the regime to count as trending
    pub min_adx: f64,
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            trend_ema_period: 200,
            adx_period: 14,
            min_adx: 18.0,
        }
    }
}

/// Gates new entries to favorable macro conditions.
///
/// The regime is on only when the latest close sits above the long EMA
/// and ADX reads at or above the configured minimum. Entries are
/// suppressed entirely while the regime is off; exits and TP/SL are never
/// suppressed. Too little history reads as regime off.
#[derive(Debug, Clone, Default)]
pub struct RegimeFilter {
    config: RegimeConfig,
}

impl RegimeFilter {
    pub fn new(config: RegimeConfig) -> Self {
        Self { config }
    }

    /// Candle count below which the filter always reads off.
    pub fn min_candles(&self) -> usize {
        self.config
            .trend_ema_period
            .max(self.config.adx_period + 2)
    }

    /// Whether the macro regime currently favors new entries.
    pub fn is_favorable(&self, candles: &[Candle]) -> bool {
        if candles.len() < self.min_candles() {
            return false;
        }

        let closes = closes(candles);
        let trend_ema = Ema::new(self.config.trend_ema_period).calculate(&closes);
        let last_close = match closes.last() {
            Some(&c) => c,
            None => return false,
        };
        let last_ema = match trend_ema.last() {
            Some(&e) => e,
            None => return false,
        };

        let adx = Adx::new(self.config.adx_period).calculate(candles);

        last_close > last_ema && adx >= self.config.min_adx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RegimeConfig {
        RegimeConfig {
            trend_ema_period: 50,
            adx_period: 14,
            min_adx: 18.0,
        }
    }

    fn rising_candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let base = 100.0 + i as f64 * 2.0;
                Candle::new(i as i64 * 900_000, base, base + 1.5, base - 0.5, base + 1.0, 1000.0)
            })
            .collect()
    }

    fn falling_candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let base = 500.0 - i as f64 * 2.0;
                Candle::new(i as i64 * 900_000, base, base + 0.5, base - 1.5, base - 1.0, 1000.0)
            })
            .collect()
    }

    #[test]
    fn test_regime_off_on_short_history() {
        let filter = RegimeFilter::new(config());
        assert!(!filter.is_favorable(&rising_candles(30)));
        assert!(!filter.is_favorable(&[]));
    }

    #[test]
    fn test_regime_on_in_strong_uptrend() {
        let filter = RegimeFilter::new(config());
        assert!(filter.is_favorable(&rising_candles(120)));
    }

    #[test]
    fn test_regime_off_below_trend_ema() {
        let filter = RegimeFilter::new(config());
        // Strong trend strength, but price is under the long EMA
        assert!(!filter.is_favorable(&falling_candles(120)));
    }

    #[test]
    fn test_regime_off_without_trend_strength() {
        // Price pinned just above a flat EMA with no directional movement
        let filter = RegimeFilter::new(config());
        // 121 bars so the final bar lands on the +0.2 side of the EMA
        let candles: Vec<Candle> = (0..121)
            .map(|i| {
                let base = 100.0 + if i % 2 == 0 { 0.2 } else { -0.2 };
                Candle::new(i as i64 * 900_000, base, base + 0.3, base - 0.3, base, 1000.0)
            })
            .collect();
        assert!(!filter.is_favorable(&candles));
    }
}
