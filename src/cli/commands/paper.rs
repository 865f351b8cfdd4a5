//! Paper trading command implementation.

use anyhow::Result;
use coinflow_config::BotConfig;
use coinflow_core::types::{Candle, Instrument, Ticker};
use coinflow_engine::Engine;
use coinflow_exchange::PaperExchange;
use coinflow_monitor::LogNotifier;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

use crate::cli::PaperArgs;

pub async fn run(args: PaperArgs, config: BotConfig) -> Result<()> {
    info!(
        capital = args.capital,
        quotes = ?config.trading.quotes,
        symbols = ?config.trading.symbols,
        "starting paper session"
    );

    let venue = seed_venue(&config, args.capital);
    let shutdown = Arc::new(AtomicBool::new(false));

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, stopping after this cycle");
                shutdown.store(true, Ordering::Relaxed);
            }
        });
    }

    let mut engine = Engine::new(config, venue, LogNotifier, shutdown);

    match args.cycles {
        Some(n) => {
            for _ in 0..n {
                engine.run_cycle().await?;
            }
        }
        None => engine.run().await?,
    }

    let orders = engine.gateway().orders();
    println!("Paper session finished: {} order(s) placed", orders.len());
    for order in orders {
        println!(
            "  {} {} {} size={} @ {}",
            order.request.side, order.request.kind, order.request.symbol, order.request.size,
            order.fill_price
        );
    }

    Ok(())
}

/// Seed the simulated venue with deterministic market data for every
/// configured symbol and starting capital in the first quote currency.
pub(crate) fn seed_venue(config: &BotConfig, capital: f64) -> PaperExchange {
    let mut venue = PaperExchange::new();

    for (index, symbol) in config.trading.symbols.iter().enumerate() {
        let base_price = 40.0 + index as f64 * 35.0;
        let candles = synthetic_candles(base_price, config.trading.candle_limit);
        let last = candles.last().map(|c| c.close).unwrap_or(base_price);

        venue = venue
            .with_instrument(Instrument::new(
                symbol.clone(),
                dec!(0.01),
                dec!(0.0001),
                dec!(1),
            ))
            .with_ticker(
                symbol.clone(),
                Ticker {
                    best_bid: last * 0.9995,
                    best_ask: last * 1.0005,
                    last,
                },
            )
            .with_candles(symbol.clone(), candles);
    }

    if let Some(quote) = config.trading.quotes.first() {
        let amount = Decimal::from_f64(capital).unwrap_or(dec!(10_000));
        venue = venue.with_balance(quote.clone(), amount);
    }

    venue
}

/// A deterministic trending-with-chop series; no RNG so paper sessions
/// are reproducible.
fn synthetic_candles(base: f64, n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            let drift = base * 0.001 * t;
            let wave = (t * 0.35).sin() * base * 0.012 + (t * 0.11).cos() * base * 0.005;
            let close = base + drift + wave;
            let open = base + drift - wave * 0.5;
            let spread = base * 0.004;
            let high = close.max(open) + spread;
            let low = close.min(open) - spread;
            Candle::new(i as i64 * 900_000, open, high, low, close, 1_000.0 + t)
        })
        .collect()
}
