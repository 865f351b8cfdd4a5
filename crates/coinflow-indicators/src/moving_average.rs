//! Moving average indicators.

use coinflow_core::traits::Indicator;

/// Exponential Moving Average (EMA).
///
/// Seeded with the first value and smoothed with k = 2/(period+1), so the
/// output has the same length as the input. This matches the recursive
/// form the signal ensemble compares at the last two bars.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
}

impl Ema {
    /// Create a new EMA with the specified period.
    ///
    /// A zero period is degenerate and yields an empty output.
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.is_empty() || self.period == 0 {
            return vec![];
        }

        let k = 2.0 / (self.period as f64 + 1.0);
        let one_minus_k = 1.0 - k;

        let mut result = Vec::with_capacity(data.len());
        let mut ema = data[0];

        for &value in data {
            ema = value * k + ema * one_minus_k;
            result.push(ema);
        }

        result
    }

    fn min_len(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
