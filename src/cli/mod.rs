//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coinflow")]
#[command(author, version, about = "Autonomous spot trading engine with multi-quote routing")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the engine against the simulated paper venue
    Paper(PaperArgs),
    /// Start live trading
    Live(LiveArgs),
    /// Preflight diagnostics: connectivity, balances, metadata, probe order
    Check(CheckArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct PaperArgs {
    /// Starting capital in the first configured quote currency
    #[arg(long, default_value = "10000")]
    pub capital: f64,

    /// Run a fixed number of cycles instead of looping until ctrl-c
    #[arg(long)]
    pub cycles: Option<u32>,
}

#[derive(clap::Args)]
pub struct LiveArgs {
    /// Confirm that orders should really reach the venue
    #[arg(long)]
    pub no_dry_run: bool,
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Symbol to probe (defaults to the first configured symbol)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Notional for the probe order, quote units
    #[arg(long, default_value = "5")]
    pub notional: f64,
}
