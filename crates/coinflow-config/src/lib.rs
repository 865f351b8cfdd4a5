//! Configuration management.

mod settings;

pub use settings::{
    AppSettings, BotConfig, ExchangeSettings, LoggingConfig, RouterSettings, TelegramSettings,
    TradingSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables use the `COINFLOW__` prefix with `__` as the
/// section separator, e.g. `COINFLOW__TRADING__POLL_SECS=15`.
pub fn load_config(path: &Path) -> Result<BotConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("COINFLOW")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
