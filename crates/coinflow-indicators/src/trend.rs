//! Trend-strength indicators.

use coinflow_core::traits::CandleIndicator;
use coinflow_core::types::Candle;

/// Average Directional Index (ADX).
///
/// Wilder smoothing of true range and directional movement, DX per bar,
/// then a running Wilder average of DX. Reduces to the latest value; the
/// regime filter only ever looks at the most recent reading.
#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
}

impl Adx {
    /// Create a new ADX indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl CandleIndicator for Adx {
    fn calculate(&self, candles: &[Candle]) -> f64 {
        let p = self.period;
        if p == 0 || candles.len() < p + 2 {
            return 0.0;
        }

        let n = candles.len();
        let mut trs = Vec::with_capacity(n - 1);
        let mut plus_dm = Vec::with_capacity(n - 1);
        let mut minus_dm = Vec::with_capacity(n - 1);

        for i in 1..n {
            let up = candles[i].high - candles[i - 1].high;
            let down = candles[i - 1].low - candles[i].low;
            plus_dm.push(if up > down && up > 0.0 { up } else { 0.0 });
            minus_dm.push(if down > up && down > 0.0 { down } else { 0.0 });
            trs.push(candles[i].true_range(Some(candles[i - 1].close)));
        }

        let pf = p as f64;
        let mut tr_s: f64 = trs[..p].iter().sum();
        let mut plus_s: f64 = plus_dm[..p].iter().sum();
        let mut minus_s: f64 = minus_dm[..p].iter().sum();

        let mut dxs = vec![dx(plus_s, minus_s, tr_s)];

        // Wilder's smoothed sums: next = prev - prev/period + value
        for i in p..trs.len() {
            tr_s = tr_s - tr_s / pf + trs[i];
            plus_s = plus_s - plus_s / pf + plus_dm[i];
            minus_s = minus_s - minus_s / pf + minus_dm[i];
            dxs.push(dx(plus_s, minus_s, tr_s));
        }

        // First ADX is the mean of the available DX values (up to one
        // period's worth), smoothed with Wilder's running average after.
        let seed_len = dxs.len().min(p);
        let mut adx: f64 = dxs[..seed_len].iter().sum::<f64>() / seed_len as f64;
        for &value in &dxs[seed_len..] {
            adx = (adx * (pf - 1.0) + value) / pf;
        }

        adx
    }

    fn min_candles(&self) -> usize {
        self.period + 2
    }

    fn name(&self) -> &str {
        "ADX"
    }
}

fn dx(plus_s: f64, minus_s: f64, tr_s: f64) -> f64 {
    if tr_s <= 0.0 {
        return 0.0;
    }
    let plus_di = 100.0 * plus_s / tr_s;
    let minus_di = 100.0 * minus_s / tr_s;
    let di_sum = plus_di + minus_di;
    if di_sum == 0.0 {
        0.0
    } else {
        100.0 * (plus_di - minus_di).abs() / di_sum
    }
}
