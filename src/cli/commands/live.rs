//! Live trading command implementation.

use anyhow::Result;
use coinflow_config::BotConfig;
use tracing::info;

use crate::cli::LiveArgs;

pub async fn run(args: LiveArgs, config: BotConfig) -> Result<()> {
    info!(
        quotes = ?config.trading.quotes,
        symbols = ?config.trading.symbols,
        dry_run = config.exchange.dry_run && !args.no_dry_run,
        "live trading requested"
    );

    println!("Live trading requires a venue connector and API credentials.");
    println!("No connector is configured in this build.");
    println!("\nUse the 'paper' command to run the engine against the simulated venue,");
    println!("and 'check' to preflight a configuration.");

    Ok(())
}
