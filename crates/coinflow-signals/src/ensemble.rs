//! Multi-signal ensemble voting.

use coinflow_core::traits::Indicator;
use coinflow_core::types::{closes, Candle};
use coinflow_indicators::{Ema, Rsi};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Direction of an ensemble decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Buy => write!(f, "buy"),
            Direction::Sell => write!(f, "sell"),
        }
    }
}

/// One voter's opinion for the current bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Buy,
    Sell,
    None,
}

/// Configuration for the signal ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    /// Fast EMA period for the cross vote
    pub ema_fast: usize,
    /// Slow EMA period for the cross vote
    pub ema_slow: usize,
    /// Lookback for the breakout vote
    pub breakout_lookback: usize,
    /// RSI period for the mean-reversion vote
    pub rsi_period: usize,
    /// RSI level below which mean-reversion votes buy
    pub rsi_oversold: f64,
    /// RSI level above which mean-reversion votes sell
    pub rsi_overbought: f64,
    /// Votes required on the winning side
    pub min_votes: usize,
    /// Minimum closes before the ensemble votes at all
    pub min_closes: usize,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            ema_fast: 20,
            ema_slow: 50,
            breakout_lookback: 20,
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            min_votes: 2,
            min_closes: 60,
        }
    }
}

/// An ensemble decision with its vote breakdown.
#[derive(Debug, Clone)]
pub struct Signal {
    pub direction: Direction,
    pub buy_votes: usize,
    pub sell_votes: usize,
    /// Human-readable vote summary, used in alerts and logs
    pub reason: String,
}

/// Combines three independent indicator votes into one decision.
#[derive(Debug, Clone, Default)]
pub struct SignalEnsemble {
    config: EnsembleConfig,
}

impl SignalEnsemble {
    pub fn new(config: EnsembleConfig) -> Self {
        Self { config }
    }

    /// Evaluate the ensemble over a candle sequence (oldest to newest).
    ///
    /// Abstains (`None`) below `min_closes`, on a vote tie, or when
    /// neither side reaches `min_votes`.
    pub fn evaluate(&self, candles: &[Candle]) -> Option<Signal> {
        let closes = closes(candles);
        if closes.len() < self.config.min_closes {
            return None;
        }

        let cross = self.ema_cross_vote(&closes);
        let breakout = self.breakout_vote(candles);
        let reversion = self.mean_reversion_vote(&closes);

        let votes = [cross, breakout, reversion];
        let buy_votes = votes.iter().filter(|v| **v == Vote::Buy).count();
        let sell_votes = votes.iter().filter(|v| **v == Vote::Sell).count();

        debug!(
            ?cross,
            ?breakout,
            ?reversion,
            buy_votes,
            sell_votes,
            "ensemble votes"
        );

        let direction = tally(buy_votes, sell_votes, self.config.min_votes)?;
        let reason = format!(
            "ema_cross={:?} breakout={:?} rsi={:?} ({} buy / {} sell)",
            cross, breakout, reversion, buy_votes, sell_votes
        );

        Some(Signal {
            direction,
            buy_votes,
            sell_votes,
            reason,
        })
    }

    /// Buy when the fast EMA crosses from at-or-below to above the slow
    /// EMA on the most recent bar; sell on the symmetric downward cross.
    fn ema_cross_vote(&self, closes: &[f64]) -> Vote {
        let fast = Ema::new(self.config.ema_fast).calculate(closes);
        let slow = Ema::new(self.config.ema_slow).calculate(closes);
        if fast.len() < 2 || slow.len() < 2 {
            return Vote::None;
        }

        let (f_prev, f_last) = (fast[fast.len() - 2], fast[fast.len() - 1]);
        let (s_prev, s_last) = (slow[slow.len() - 2], slow[slow.len() - 1]);

        if f_prev <= s_prev && f_last > s_last {
            Vote::Buy
        } else if f_prev >= s_prev && f_last < s_last {
            Vote::Sell
        } else {
            Vote::None
        }
    }

    /// Buy when the latest close clears the trailing lookback high, sell
    /// when it breaks the trailing lookback low. The window excludes the
    /// latest bar itself.
    fn breakout_vote(&self, candles: &[Candle]) -> Vote {
        let lookback = self.config.breakout_lookback;
        if candles.len() < lookback + 1 {
            return Vote::None;
        }

        let last_close = candles[candles.len() - 1].close;
        let window = &candles[candles.len() - 1 - lookback..candles.len() - 1];
        let max_high = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let min_low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);

        if last_close > max_high {
            Vote::Buy
        } else if last_close < min_low {
            Vote::Sell
        } else {
            Vote::None
        }
    }

    /// Buy when RSI is oversold, sell when overbought.
    fn mean_reversion_vote(&self, closes: &[f64]) -> Vote {
        let rsi = Rsi::new(self.config.rsi_period).calculate(closes);
        match rsi.last() {
            Some(&value) if value < self.config.rsi_oversold => Vote::Buy,
            Some(&value) if value > self.config.rsi_overbought => Vote::Sell,
            _ => Vote::None,
        }
    }
}

/// Resolve vote counts into a decision.
///
/// Buy iff `buy >= min_votes && buy > sell`; sell symmetric; everything
/// else — including ties where both sides reach the threshold — is no
/// decision.
pub fn tally(buy: usize, sell: usize, min_votes: usize) -> Option<Direction> {
    if buy >= min_votes && buy > sell {
        Some(Direction::Buy)
    } else if sell >= min_votes && sell > buy {
        Some(Direction::Sell)
    } else {
        None
    }
}
