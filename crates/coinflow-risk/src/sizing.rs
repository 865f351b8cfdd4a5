//! Position sizing under venue quantization rules.

use coinflow_core::types::Instrument;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Order sizing method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMethod {
    /// Commit a fixed fraction of the free quote balance.
    /// `risk_pct` is clamped to [1, 100].
    FixedFraction { risk_pct: Decimal },
    /// Target a per-trade risk budget in quote units against the
    /// instrument's absolute ATR. Undefined when ATR is zero; the entry
    /// is skipped.
    VolatilityTarget { risk_budget: Decimal },
}

impl Default for SizingMethod {
    fn default() -> Self {
        SizingMethod::FixedFraction { risk_pct: dec!(10) }
    }
}

/// Computes a quantized order quantity for an entry.
#[derive(Debug, Clone)]
pub struct OrderSizer {
    method: SizingMethod,
    min_trade_notional: Decimal,
}

impl OrderSizer {
    /// Create a new sizer.
    pub fn new(method: SizingMethod, min_trade_notional: Decimal) -> Self {
        Self {
            method,
            min_trade_notional,
        }
    }

    /// Compute the order quantity in base units, or `None` when no valid
    /// order exists (zero ATR, dust after quantization, bad price).
    ///
    /// The result is an integer multiple of the instrument's base
    /// increment, and the instrument's `min_funds` overrides a too-small
    /// notional upward before quantization.
    pub fn order_quantity(
        &self,
        instrument: &Instrument,
        price: Decimal,
        free_quote: Decimal,
        atr_abs: f64,
    ) -> Option<Decimal> {
        if price <= Decimal::ZERO {
            return None;
        }

        let notional = match &self.method {
            SizingMethod::FixedFraction { risk_pct } => {
                let rp = (*risk_pct).clamp(dec!(1), dec!(100));
                (free_quote * rp / dec!(100)).max(self.min_trade_notional)
            }
            SizingMethod::VolatilityTarget { risk_budget } => {
                if atr_abs <= 0.0 {
                    return None;
                }
                let atr = Decimal::from_f64(atr_abs).filter(|a| *a > Decimal::ZERO)?;
                (*risk_budget / atr) * price
            }
        };

        let notional = if instrument.min_funds > Decimal::ZERO {
            notional.max(instrument.min_funds)
        } else {
            notional
        };

        let quantity = instrument.snap_quantity(notional / price);
        if quantity <= Decimal::ZERO {
            None
        } else {
            Some(quantity)
        }
    }
}
