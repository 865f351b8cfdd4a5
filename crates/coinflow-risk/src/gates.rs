//! Entry admission gates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of an admission check.
#[derive(Debug, Clone, PartialEq)]
pub enum GateCheck {
    /// Entry allowed
    Allowed,
    /// Entry blocked with reason
    Blocked { reason: String },
}

impl GateCheck {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateCheck::Allowed)
    }
}

/// Everything the gates need to know about the candidate entry. Gathered
/// by the control loop, so the checks themselves stay pure.
#[derive(Debug, Clone)]
pub struct EntryContext {
    /// Instrument is still inside its cooldown window
    pub in_cooldown: bool,
    /// Current balance of the instrument's base currency
    pub base_balance: Decimal,
    /// Share of capital already allocated to the base currency, percent
    pub allocation_pct: f64,
    /// Positions currently tracked across all instruments
    pub open_positions: usize,
}

/// Entry preconditions, independent of sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionGates {
    /// Ceiling on allocation to one base currency, percent
    pub max_allocation_pct: f64,
    /// Ceiling on concurrently open positions
    pub max_open_positions: usize,
}

impl Default for AdmissionGates {
    fn default() -> Self {
        Self {
            max_allocation_pct: 50.0,
            max_open_positions: 5,
        }
    }
}

impl AdmissionGates {
    /// Check all admission gates for a candidate entry.
    pub fn check_entry(&self, ctx: &EntryContext) -> GateCheck {
        if ctx.in_cooldown {
            return GateCheck::Blocked {
                reason: "instrument in cooldown".to_string(),
            };
        }

        // Anti-stacking: never add to an existing holding
        if ctx.base_balance > Decimal::ZERO {
            return GateCheck::Blocked {
                reason: "base balance already held".to_string(),
            };
        }

        if ctx.allocation_pct >= self.max_allocation_pct {
            return GateCheck::Blocked {
                reason: format!(
                    "allocation {:.1}% >= max {:.1}%",
                    ctx.allocation_pct, self.max_allocation_pct
                ),
            };
        }

        if ctx.open_positions >= self.max_open_positions {
            return GateCheck::Blocked {
                reason: format!(
                    "open positions {} >= max {}",
                    ctx.open_positions, self.max_open_positions
                ),
            };
        }

        GateCheck::Allowed
    }
}

/// Share of capital already sitting in a position, in percent:
/// `position_value / (position_value + free_quote) * 100`.
pub fn allocation_pct(position_value: f64, free_quote: f64) -> f64 {
    let total = position_value + free_quote;
    if total > 0.0 {
        position_value / total * 100.0
    } else {
        0.0
    }
}
