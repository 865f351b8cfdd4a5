//! Per-instrument evaluation outcomes.

use rust_decimal::Decimal;

/// Why an instrument was passed over this cycle. Ordinary admission
/// failures are values, not errors; only venue failures surface as
/// `GatewayError`.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Not listed and no fallback quote lists the base
    NotListed,
    /// Inside the cooldown window
    Cooldown,
    /// ATR% under the volatility floor
    LowVolatility { atr_pct: f64 },
    /// Spread% over the ceiling
    WideSpread { spread_pct: f64 },
    /// Ensemble abstained
    NoSignal,
    /// Sell signal with nothing held
    NothingToSell,
    /// Macro regime unfavorable for entries
    RegimeOff,
    /// An admission gate blocked the entry
    EntryBlocked { reason: String },
    /// No conversion route to the settlement currency
    NoRoute,
    /// Still short of quote after routing
    InsufficientQuote { free: Decimal },
    /// Quantization left nothing to order
    DustQuantity,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotListed => write!(f, "not listed"),
            SkipReason::Cooldown => write!(f, "in cooldown"),
            SkipReason::LowVolatility { atr_pct } => {
                write!(f, "low volatility ({atr_pct:.2}% ATR)")
            }
            SkipReason::WideSpread { spread_pct } => {
                write!(f, "spread too wide ({spread_pct:.2}%)")
            }
            SkipReason::NoSignal => write!(f, "no signal"),
            SkipReason::NothingToSell => write!(f, "sell signal with nothing held"),
            SkipReason::RegimeOff => write!(f, "regime off"),
            SkipReason::EntryBlocked { reason } => write!(f, "entry blocked: {reason}"),
            SkipReason::NoRoute => write!(f, "no conversion route"),
            SkipReason::InsufficientQuote { free } => {
                write!(f, "insufficient quote after routing (free {free})")
            }
            SkipReason::DustQuantity => write!(f, "dust quantity after quantization"),
        }
    }
}

/// What happened to one instrument in one cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalOutcome {
    /// Entry order confirmed
    Entered { symbol: String, size: Decimal },
    /// Full exit order confirmed
    Exited { symbol: String, reason: String },
    /// Position kept, nothing to do
    Held,
    /// Passed over for this cycle
    Skipped(SkipReason),
}
