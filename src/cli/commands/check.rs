//! Preflight diagnostics command.
//!
//! Walks the same gateway calls a live session depends on: clock drift,
//! balances, instrument metadata, a quantized probe order, and the cancel
//! path. A failing step explains what would block the trading loop.

use anyhow::{bail, Result};
use chrono::Utc;
use coinflow_config::BotConfig;
use coinflow_core::traits::ExchangeGateway;
use coinflow_core::types::{AccountType, OrderRequest, Side};
use coinflow_exchange::DryRunGateway;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::cli::CheckArgs;

/// Drift beyond this suggests the host clock needs a resync.
const MAX_CLOCK_DRIFT_MS: i64 = 15_000;

pub async fn run(args: CheckArgs, config: BotConfig) -> Result<()> {
    // No venue connector in this build: preflight exercises the paper
    // venue behind the dry-run decorator, the same wiring a live gateway
    // would use.
    let venue = DryRunGateway::new(super::paper::seed_venue(&config, 1_000.0));

    let symbol = args
        .symbol
        .clone()
        .or_else(|| config.trading.symbols.first().cloned())
        .unwrap_or_default();
    if symbol.is_empty() {
        bail!("no symbol to probe; configure trading.symbols or pass --symbol");
    }

    run_checks(&venue, &config, &symbol, args.notional).await?;

    println!();
    println!("Preflight complete. If every step is green, any remaining");
    println!("inactivity comes from the strategy gates, not connectivity.");
    Ok(())
}

async fn run_checks<G: ExchangeGateway>(
    gateway: &G,
    config: &BotConfig,
    symbol: &str,
    notional: f64,
) -> Result<()> {
    // Clock drift
    let server_ms = gateway.server_time().await?;
    let drift = (server_ms - Utc::now().timestamp_millis()).abs();
    if drift > MAX_CLOCK_DRIFT_MS {
        println!("! Time drift ~{drift} ms; resync the host clock before trading");
    } else {
        println!("+ Ping OK. Time drift ~{drift} ms");
    }

    // Balances per configured quote
    for quote in &config.trading.quotes {
        let balance = gateway.balance(AccountType::Trade, quote).await?;
        println!("+ Balance: trade {quote}={balance}");
    }

    // Instrument metadata
    let listing = gateway.listing_snapshot().await?;
    let Some(instrument) = listing.get(symbol) else {
        bail!("symbol {symbol} not listed");
    };
    println!(
        "+ {} -> base={} quote={}, tick={}, step={}, minFunds={}",
        instrument.symbol,
        instrument.base,
        instrument.quote,
        instrument.price_increment,
        instrument.base_increment,
        instrument.min_funds
    );

    // Quantized probe quantity
    let ticker = gateway.ticker(symbol).await?;
    let Some(bid) = Decimal::from_f64(ticker.best_bid).filter(|p| *p > Decimal::ZERO) else {
        bail!("no bid for {symbol}");
    };
    let probe_notional = Decimal::from_f64(notional)
        .unwrap_or(dec!(5))
        .max(instrument.min_funds);
    let quantity = instrument.snap_quantity(probe_notional / bid);
    if quantity <= Decimal::ZERO {
        bail!("probe quantity quantized to zero; raise --notional or pick another pair");
    }
    println!("+ Price ~ {bid}, probe qty={quantity}");

    // Probe order at a passive price, then cancel
    let price = probe_limit_price(bid, instrument.price_increment);
    let receipt = gateway
        .place_order(OrderRequest::limit(symbol, Side::Buy, quantity, price))
        .await?;
    println!("+ LIMIT BUY sent: id={}", receipt.order_id);

    if gateway.cancel_order(&receipt.order_id).await? {
        println!("+ Probe order canceled");
    } else {
        println!("! Probe order cancel reported failure; check it on the venue");
    }

    Ok(())
}

/// A bid shaded 0.5% lower, rounded to the price increment, so the probe
/// rests instead of filling.
fn probe_limit_price(bid: Decimal, tick: Decimal) -> Decimal {
    let shaded = bid * dec!(0.995);
    if tick <= Decimal::ZERO {
        return shaded;
    }
    (shaded / tick).round() * tick
}
