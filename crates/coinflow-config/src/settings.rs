//! Configuration structures.

use coinflow_core::error::BotError;
use coinflow_core::types::Interval;
use coinflow_risk::{AdmissionGates, ExitRule, SizingMethod};
use coinflow_signals::{EnsembleConfig, RegimeConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BotConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub exchange: ExchangeSettings,
    #[serde(default)]
    pub trading: TradingSettings,
    #[serde(default)]
    pub ensemble: EnsembleConfig,
    #[serde(default)]
    pub regime: RegimeConfig,
    #[serde(default)]
    pub router: RouterSettings,
    #[serde(default)]
    pub telegram: TelegramSettings,
}

impl BotConfig {
    /// Validate cross-field constraints that serde defaults cannot catch.
    pub fn validate(&self) -> Result<(), BotError> {
        if self.trading.quotes.is_empty() {
            return Err(BotError::Config("at least one quote required".into()));
        }
        if self.trading.symbols.is_empty() {
            return Err(BotError::Config("at least one symbol required".into()));
        }
        for symbol in &self.trading.symbols {
            if !symbol.contains('-') {
                return Err(BotError::Config(format!(
                    "symbol {symbol} is not of the form BASE-QUOTE"
                )));
            }
        }
        if self.trading.poll_secs == 0 {
            return Err(BotError::Config("poll_secs must be positive".into()));
        }
        if self.trading.exits.tp_pct <= 0.0 || self.trading.exits.sl_pct <= 0.0 {
            return Err(BotError::Config(
                "tp_pct and sl_pct must be positive".into(),
            ));
        }
        if self.router.max_hops == 0 {
            return Err(BotError::Config("max_hops must be positive".into()));
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "coinflow".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Exchange gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeSettings {
    /// Orders become logged no-ops
    pub dry_run: bool,
    /// Use the venue sandbox environment
    pub sandbox: bool,
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            dry_run: true,
            sandbox: false,
        }
    }
}

/// Trading loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingSettings {
    /// Settlement currencies evaluated each cycle
    pub quotes: Vec<String>,
    /// Instruments to trade
    pub symbols: Vec<String>,
    /// Candle interval for indicator computation
    pub interval: Interval,
    /// Candles fetched per instrument per cycle
    pub candle_limit: usize,
    /// Seconds between cycles
    pub poll_secs: u64,
    /// Seconds an instrument stays quiet after an entry or exit
    pub cooldown_secs: u64,
    /// Floor on order notional, quote units
    pub min_trade_notional: Decimal,
    /// Per-currency balance held back from sizing
    pub reserve: HashMap<String, Decimal>,
    /// Order sizing method
    pub sizing: SizingMethod,
    /// Entry admission gates
    pub gates: AdmissionGates,
    /// ATR period for the volatility floor and ATR-based sizing
    pub atr_period: usize,
    /// Minimum ATR% for an instrument to be worth trading
    pub min_atr_pct: f64,
    /// Maximum spread% for an instrument to be tradeable
    pub max_spread_pct: f64,
    /// Run the TP/SL supervisor
    pub enable_tp_sl: bool,
    /// TP/SL thresholds
    pub exits: ExitRule,
}

impl Default for TradingSettings {
    fn default() -> Self {
        let mut reserve = HashMap::new();
        reserve.insert("USDT".to_string(), dec!(20));
        reserve.insert("BTC".to_string(), dec!(0.0002));
        Self {
            quotes: vec!["USDT".to_string()],
            symbols: vec!["BTC-USDT".to_string(), "ETH-USDT".to_string()],
            interval: Interval::Min15,
            candle_limit: 240,
            poll_secs: 30,
            cooldown_secs: 90,
            min_trade_notional: dec!(10),
            reserve,
            sizing: SizingMethod::default(),
            gates: AdmissionGates::default(),
            atr_period: 14,
            min_atr_pct: 0.3,
            max_spread_pct: 0.8,
            enable_tp_sl: true,
            exits: ExitRule::default(),
        }
    }
}

/// Liquidity router settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Maximum conversions in one route
    pub max_hops: usize,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self { max_hops: 3 }
    }
}

/// Telegram alert settings. Alerts are disabled unless both values are
/// present.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TelegramSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(BotConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_quotes_rejected() {
        let mut config = BotConfig::default();
        config.trading.quotes.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_symbol_rejected() {
        let mut config = BotConfig::default();
        config.trading.symbols = vec!["BTCUSDT".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_poll_rejected() {
        let mut config = BotConfig::default();
        config.trading.poll_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = BotConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: BotConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.trading.quotes, config.trading.quotes);
        assert_eq!(parsed.trading.candle_limit, config.trading.candle_limit);
    }
}
