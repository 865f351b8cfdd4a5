//! coinflow CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use coinflow_config::load_config;
use coinflow_monitor::setup_logging;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config validation reports its own errors without a logger
    if matches!(cli.command, Commands::ValidateConfig) {
        return cli::commands::validate::run(&cli.config).await;
    }

    let config = load_config(&cli.config)?;
    config.validate()?;

    let level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let json = cli.json_logs || config.logging.format == "json";
    let file = config.logging.file.as_ref().map(PathBuf::from);
    let _guard = setup_logging(&level, json, file.as_deref());

    match cli.command {
        Commands::Paper(args) => cli::commands::paper::run(args, config).await,
        Commands::Live(args) => cli::commands::live::run(args, config).await,
        Commands::Check(args) => cli::commands::check::run(args, config).await,
        Commands::ValidateConfig => unreachable!("handled above"),
    }
}
