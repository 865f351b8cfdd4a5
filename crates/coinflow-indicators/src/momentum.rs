//! Momentum indicators.

use coinflow_core::traits::Indicator;

/// Relative Strength Index (RSI), Wilder style.
///
/// Average gain and loss are seeded from the first `period` price changes
/// and smoothed recursively after that. When the average loss is zero the
/// relative strength is unbounded and RSI saturates at 100.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if self.period == 0 || data.len() <= self.period {
            return vec![];
        }

        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);

        for window in data.windows(2) {
            let change = window[1] - window[0];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let p = self.period as f64;
        let mut avg_gain: f64 = gains[..self.period].iter().sum::<f64>() / p;
        let mut avg_loss: f64 = losses[..self.period].iter().sum::<f64>() / p;

        let mut result = Vec::with_capacity(data.len() - self.period);
        result.push(Self::rsi_value(avg_gain, avg_loss));

        // Wilder's smoothing: avg = (prev_avg * (period-1) + value) / period
        for i in self.period..gains.len() {
            avg_gain = (avg_gain * (p - 1.0) + gains[i]) / p;
            avg_loss = (avg_loss * (p - 1.0) + losses[i]) / p;
            result.push(Self::rsi_value(avg_gain, avg_loss));
        }

        result
    }

    fn min_len(&self) -> usize {
        self.period + 1
    }

    fn name(&self) -> &str {
        "RSI"
    }
}
