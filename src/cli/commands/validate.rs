//! Validate configuration command.

use anyhow::Result;
use coinflow_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Dry run: {}", config.exchange.dry_run);
    println!("Quotes: {}", config.trading.quotes.join(", "));
    println!("Symbols: {}", config.trading.symbols.join(", "));
    println!("Interval: {}", config.trading.interval);
    println!("Poll every: {}s", config.trading.poll_secs);
    println!("Cooldown: {}s", config.trading.cooldown_secs);
    println!("Max hops: {}", config.router.max_hops);
    println!(
        "TP/SL: {} (+{}% / -{}%)",
        config.trading.enable_tp_sl, config.trading.exits.tp_pct, config.trading.exits.sl_pct
    );

    Ok(())
}
