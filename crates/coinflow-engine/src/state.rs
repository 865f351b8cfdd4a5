//! Process-lifetime engine state.

use chrono::{DateTime, Utc};
use coinflow_core::types::Position;
use std::collections::HashMap;

/// Positions and cooldowns, owned exclusively by the control loop.
///
/// Nothing here survives a restart; on startup the state is rebuilt by
/// observing current balances (position inference).
#[derive(Debug, Default)]
pub struct EngineState {
    positions: HashMap<String, Position>,
    cooldowns: HashMap<String, DateTime<Utc>>,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracked position for a symbol.
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }

    /// Whether a position is tracked for a symbol.
    pub fn has_position(&self, symbol: &str) -> bool {
        self.positions.contains_key(symbol)
    }

    /// Track a position, replacing any previous one for the symbol.
    pub fn track(&mut self, position: Position) {
        self.positions.insert(position.symbol.clone(), position);
    }

    /// Stop tracking a symbol's position.
    pub fn untrack(&mut self, symbol: &str) -> Option<Position> {
        self.positions.remove(symbol)
    }

    /// Number of concurrently tracked positions.
    pub fn open_positions(&self) -> usize {
        self.positions.len()
    }

    /// Whether a symbol is still inside its cooldown window.
    pub fn in_cooldown(&self, symbol: &str, now: DateTime<Utc>) -> bool {
        self.cooldowns
            .get(symbol)
            .is_some_and(|until| now < *until)
    }

    /// Quiet a symbol until the given instant.
    pub fn start_cooldown(&mut self, symbol: &str, until: DateTime<Utc>) {
        self.cooldowns.insert(symbol.to_string(), until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;

    #[test]
    fn test_track_untrack() {
        let mut state = EngineState::new();
        assert!(!state.has_position("BTC-USDT"));

        state.track(Position::new("BTC-USDT", 100.0, Decimal::ONE));
        assert!(state.has_position("BTC-USDT"));
        assert_eq!(state.open_positions(), 1);

        let removed = state.untrack("BTC-USDT").unwrap();
        assert_eq!(removed.symbol, "BTC-USDT");
        assert_eq!(state.open_positions(), 0);
    }

    #[test]
    fn test_cooldown_window() {
        let mut state = EngineState::new();
        let now = Utc::now();

        assert!(!state.in_cooldown("BTC-USDT", now));

        state.start_cooldown("BTC-USDT", now + Duration::seconds(90));
        assert!(state.in_cooldown("BTC-USDT", now));
        assert!(state.in_cooldown("BTC-USDT", now + Duration::seconds(89)));
        assert!(!state.in_cooldown("BTC-USDT", now + Duration::seconds(90)));
        assert!(!state.in_cooldown("BTC-USDT", now + Duration::seconds(300)));
    }
}
