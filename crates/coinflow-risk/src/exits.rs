//! Take-profit / stop-loss exit rule.

use serde::{Deserialize, Serialize};

/// Why a supervised exit fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    TakeProfit,
    StopLoss,
}

impl std::fmt::Display for ExitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitReason::TakeProfit => write!(f, "take-profit"),
            ExitReason::StopLoss => write!(f, "stop-loss"),
        }
    }
}

/// Percent-offset exit thresholds, checked against the last traded price
/// every cycle.
///
/// For a valid entry price and positive percentages at most one side can
/// trigger per check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitRule {
    /// Take-profit offset above entry, percent
    pub tp_pct: f64,
    /// Stop-loss offset below entry, percent
    pub sl_pct: f64,
}

impl Default for ExitRule {
    fn default() -> Self {
        Self {
            tp_pct: 1.5,
            sl_pct: 1.0,
        }
    }
}

impl ExitRule {
    /// Price at which take-profit fires.
    pub fn take_profit_price(&self, entry: f64) -> f64 {
        entry * (1.0 + self.tp_pct / 100.0)
    }

    /// Price at which stop-loss fires.
    pub fn stop_loss_price(&self, entry: f64) -> f64 {
        entry * (1.0 - self.sl_pct / 100.0)
    }

    /// Check the last price against both thresholds.
    pub fn check(&self, entry: f64, last: f64) -> Option<ExitReason> {
        if last >= self.take_profit_price(entry) {
            Some(ExitReason::TakeProfit)
        } else if last <= self.stop_loss_price(entry) {
            Some(ExitReason::StopLoss)
        } else {
            None
        }
    }
}
