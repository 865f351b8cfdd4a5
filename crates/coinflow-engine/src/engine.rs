//! Per-cycle orchestration.

use crate::outcome::{EvalOutcome, SkipReason};
use crate::state::EngineState;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use coinflow_config::BotConfig;
use coinflow_core::error::{BotResult, GatewayError};
use coinflow_core::traits::{CandleIndicator, ExchangeGateway, Notifier};
use coinflow_core::types::{
    AccountType, Candle, Instrument, OrderReceipt, OrderRequest, Position, Side, Ticker,
};
use coinflow_exchange::RetryPolicy;
use coinflow_indicators::{spread_pct, AtrPercent};
use coinflow_risk::{allocation_pct, EntryContext, ExitRule, GateCheck, OrderSizer};
use coinflow_router::{QuoteGraph, RouteExecutor};
use coinflow_signals::{Direction, RegimeFilter, Signal, SignalEnsemble};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Pause after a failed cycle before trying again.
const CYCLE_FAILURE_DELAY: Duration = Duration::from_secs(5);

/// The autonomous decision engine.
///
/// Owns the process-lifetime position/cooldown state and runs one
/// sequential evaluation pass per polling interval. Within a cycle, for
/// each quote, TP/SL supervision always runs before entry-signal
/// evaluation, so protective exits take priority over opening new risk.
pub struct Engine<G, N> {
    gateway: G,
    notifier: N,
    config: BotConfig,
    ensemble: SignalEnsemble,
    regime: RegimeFilter,
    sizer: OrderSizer,
    router: RouteExecutor,
    retry: RetryPolicy,
    exit_rule: ExitRule,
    state: EngineState,
    shutdown: Arc<AtomicBool>,
}

impl<G: ExchangeGateway, N: Notifier> Engine<G, N> {
    pub fn new(config: BotConfig, gateway: G, notifier: N, shutdown: Arc<AtomicBool>) -> Self {
        let ensemble = SignalEnsemble::new(config.ensemble.clone());
        let regime = RegimeFilter::new(config.regime.clone());
        let sizer = OrderSizer::new(
            config.trading.sizing.clone(),
            config.trading.min_trade_notional,
        );
        let router = RouteExecutor::new(config.router.max_hops);
        let exit_rule = config.trading.exits.clone();

        Self {
            gateway,
            notifier,
            config,
            ensemble,
            regime,
            sizer,
            router,
            retry: RetryPolicy::default(),
            exit_rule,
            state: EngineState::new(),
            shutdown,
        }
    }

    /// Current engine state (positions, cooldowns).
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The wrapped gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Run until the shutdown flag is raised.
    ///
    /// A failed cycle is logged, reported, and followed by a short delay;
    /// only the shutdown flag ends the loop.
    pub async fn run(&mut self) -> BotResult<()> {
        info!(gateway = self.gateway.name(), "engine starting");

        while !self.shutdown.load(Ordering::Relaxed) {
            if let Err(err) = self.run_cycle().await {
                error!(error = %err, "cycle failed");
                self.notifier.notify(&format!("cycle error: {err}")).await;
                tokio::time::sleep(CYCLE_FAILURE_DELAY).await;
                continue;
            }
            tokio::time::sleep(Duration::from_secs(self.config.trading.poll_secs)).await;
        }

        info!("engine stopped");
        Ok(())
    }

    /// One full pass over all configured quotes and instruments.
    pub async fn run_cycle(&mut self) -> BotResult<()> {
        let listing = self.gateway.listing_snapshot().await?;
        let graph = QuoteGraph::from_listing(&listing);
        let now = Utc::now();

        let quotes = self.config.trading.quotes.clone();
        for quote in &quotes {
            let free = self.free_after_reserve(quote).await?;
            info!(%quote, %free, "free balance after reserve");

            let suffix = format!("-{quote}");
            let symbols: Vec<String> = self
                .config
                .trading
                .symbols
                .iter()
                .filter(|s| s.ends_with(&suffix))
                .cloned()
                .collect();

            // Protective exits come first, every cycle
            if self.config.trading.enable_tp_sl {
                self.supervise_exits(&symbols, now).await;
            }

            for symbol in &symbols {
                match self.evaluate_symbol(&listing, &graph, symbol, now).await {
                    Ok(EvalOutcome::Skipped(reason)) => {
                        debug!(%symbol, %reason, "skipped")
                    }
                    Ok(outcome) => debug!(%symbol, ?outcome, "evaluated"),
                    Err(err) => {
                        // Venue failure: abandon this instrument for the
                        // cycle, tracked state stays as it was
                        warn!(%symbol, error = %err, "evaluation abandoned");
                        self.notifier.notify(&format!("{symbol}: {err}")).await;
                    }
                }
            }
        }

        Ok(())
    }

    /// Check every tracked position in `symbols` against the TP/SL rule
    /// and exit in full when a threshold is hit.
    async fn supervise_exits(&mut self, symbols: &[String], now: DateTime<Utc>) {
        for symbol in symbols {
            let Some(position) = self.state.position(symbol).cloned() else {
                continue;
            };

            let ticker = match self.gateway.ticker(symbol).await {
                Ok(ticker) => ticker,
                Err(err) => {
                    warn!(%symbol, error = %err, "ticker unavailable, exit check deferred");
                    continue;
                }
            };

            let Some(reason) = self.exit_rule.check(position.entry_price, ticker.last) else {
                continue;
            };

            let request = OrderRequest::market(symbol, Side::Sell, position.size);
            match self.place_with_retry(request).await {
                Ok(receipt) => {
                    info!(
                        %symbol,
                        %reason,
                        order_id = %receipt.order_id,
                        last = ticker.last,
                        "supervised exit"
                    );
                    self.notifier
                        .notify(&format!("{reason} {symbol} ~{:.6}", ticker.last))
                        .await;
                    self.state.untrack(symbol);
                    self.start_cooldown(symbol, now);
                }
                Err(err) => {
                    // Position stays tracked; next cycle retries
                    warn!(%symbol, error = %err, "exit order failed, position kept");
                    self.notifier
                        .notify(&format!("exit failed for {symbol}: {err}"))
                        .await;
                }
            }
        }
    }

    /// Evaluate one configured instrument: admission, signal, and action.
    async fn evaluate_symbol(
        &mut self,
        listing: &HashMap<String, Instrument>,
        graph: &QuoteGraph,
        configured: &str,
        now: DateTime<Utc>,
    ) -> Result<EvalOutcome, GatewayError> {
        let Some(symbol) = self.resolve_symbol(listing, configured) else {
            warn!(%configured, "not listed, no alternative quote found");
            return Ok(EvalOutcome::Skipped(SkipReason::NotListed));
        };
        let instrument = listing
            .get(&symbol)
            .cloned()
            .expect("resolved symbols are listed");

        if self.state.in_cooldown(&symbol, now) {
            return Ok(EvalOutcome::Skipped(SkipReason::Cooldown));
        }

        // A base balance with no tracked position means we restarted (or
        // someone traded outside the engine): adopt it at the last price
        let base_balance = self
            .gateway
            .balance(AccountType::Trade, &instrument.base)
            .await?;
        if base_balance > Decimal::ZERO && !self.state.has_position(&symbol) {
            let ticker = self.gateway.ticker(&symbol).await?;
            info!(%symbol, last = ticker.last, size = %base_balance, "position inferred from held balance");
            self.state
                .track(Position::new(&symbol, ticker.last, base_balance));
            self.announce_exit_arming(&symbol, ticker.last).await;
        }

        let candles = self
            .gateway
            .candles(
                &symbol,
                self.config.trading.interval,
                self.config.trading.candle_limit,
            )
            .await?;

        let atr = AtrPercent::new(self.config.trading.atr_period).calculate(&candles);
        if atr < self.config.trading.min_atr_pct {
            return Ok(EvalOutcome::Skipped(SkipReason::LowVolatility {
                atr_pct: atr,
            }));
        }

        let ticker = self.gateway.ticker(&symbol).await?;
        let spread = spread_pct(ticker.best_bid, ticker.best_ask);
        if spread > self.config.trading.max_spread_pct {
            return Ok(EvalOutcome::Skipped(SkipReason::WideSpread {
                spread_pct: spread,
            }));
        }

        let Some(signal) = self.ensemble.evaluate(&candles) else {
            return Ok(if self.state.has_position(&symbol) {
                EvalOutcome::Held
            } else {
                EvalOutcome::Skipped(SkipReason::NoSignal)
            });
        };
        info!(%symbol, direction = %signal.direction, reason = %signal.reason, "ensemble decision");

        match signal.direction {
            Direction::Sell => self.execute_exit_signal(&instrument, &signal, now).await,
            Direction::Buy => {
                self.execute_entry(listing, graph, &instrument, &signal, &candles, &ticker, atr, now)
                    .await
            }
        }
    }

    /// Full exit on a sell signal. Never gated by the regime filter.
    async fn execute_exit_signal(
        &mut self,
        instrument: &Instrument,
        signal: &Signal,
        now: DateTime<Utc>,
    ) -> Result<EvalOutcome, GatewayError> {
        let base_balance = self
            .gateway
            .balance(AccountType::Trade, &instrument.base)
            .await?;
        if base_balance <= Decimal::ZERO {
            return Ok(EvalOutcome::Skipped(SkipReason::NothingToSell));
        }

        let size = instrument.snap_quantity(base_balance);
        if size <= Decimal::ZERO {
            return Ok(EvalOutcome::Skipped(SkipReason::DustQuantity));
        }

        let symbol = instrument.symbol.clone();
        let request = OrderRequest::market(&symbol, Side::Sell, size);
        let receipt = self.place_with_retry(request).await?;

        info!(%symbol, %size, order_id = %receipt.order_id, "signal exit");
        self.notifier
            .notify(&format!("SELL {symbol} size={size} ({})", signal.reason))
            .await;
        self.state.untrack(&symbol);
        self.start_cooldown(&symbol, now);

        Ok(EvalOutcome::Exited {
            symbol,
            reason: "sell signal".to_string(),
        })
    }

    /// Gated, routed, sized entry on a buy signal.
    #[allow(clippy::too_many_arguments)]
    async fn execute_entry(
        &mut self,
        listing: &HashMap<String, Instrument>,
        graph: &QuoteGraph,
        instrument: &Instrument,
        signal: &Signal,
        candles: &[Candle],
        ticker: &Ticker,
        atr_pct_value: f64,
        now: DateTime<Utc>,
    ) -> Result<EvalOutcome, GatewayError> {
        let symbol = instrument.symbol.clone();

        // Entries only in a favorable macro regime
        if !self.regime.is_favorable(candles) {
            return Ok(EvalOutcome::Skipped(SkipReason::RegimeOff));
        }

        if self.state.has_position(&symbol) {
            return Ok(EvalOutcome::Skipped(SkipReason::EntryBlocked {
                reason: "position already tracked".to_string(),
            }));
        }

        let base_balance = self
            .gateway
            .balance(AccountType::Trade, &instrument.base)
            .await?;
        let free_quote = self.free_after_reserve(&instrument.quote).await?;
        let position_value = base_balance.to_f64().unwrap_or(0.0) * ticker.last;
        let allocation = allocation_pct(position_value, free_quote.to_f64().unwrap_or(0.0));

        let ctx = EntryContext {
            in_cooldown: self.state.in_cooldown(&symbol, now),
            base_balance,
            allocation_pct: allocation,
            open_positions: self.state.open_positions(),
        };
        if let GateCheck::Blocked { reason } = self.config.trading.gates.check_entry(&ctx) {
            info!(%symbol, %reason, "entry blocked");
            return Ok(EvalOutcome::Skipped(SkipReason::EntryBlocked { reason }));
        }

        // Short of settlement currency: reroute value from another quote
        let mut free = free_quote;
        let min_notional = self.config.trading.min_trade_notional;
        if free < min_notional {
            let needed = min_notional - free;
            let balances = self.quote_balances().await?;
            let Some(plan) =
                self.router
                    .plan(graph, &instrument.quote, &self.config.trading.quotes, &balances)
            else {
                info!(%symbol, "no conversion route to settlement currency");
                return Ok(EvalOutcome::Skipped(SkipReason::NoRoute));
            };

            info!(source = %plan.source, path = ?plan.path, %needed, "routing liquidity");
            self.router
                .convert(&self.gateway, listing, &plan.path, needed)
                .await?;

            free = self.free_after_reserve(&instrument.quote).await?;
            if free < min_notional {
                info!(%symbol, %free, "still short after routing");
                return Ok(EvalOutcome::Skipped(SkipReason::InsufficientQuote { free }));
            }
        }

        let atr_abs = atr_pct_value * ticker.last / 100.0;
        let Some(price) = Decimal::from_f64(ticker.best_bid).filter(|p| *p > Decimal::ZERO)
        else {
            return Ok(EvalOutcome::Skipped(SkipReason::DustQuantity));
        };
        let Some(size) = self.sizer.order_quantity(instrument, price, free, atr_abs) else {
            return Ok(EvalOutcome::Skipped(SkipReason::DustQuantity));
        };

        let receipt = self
            .place_with_retry(OrderRequest::market(&symbol, Side::Buy, size))
            .await?;

        // Entry recorded at the post-order last price; the fill itself is
        // fire-and-forget
        let entry = self.gateway.ticker(&symbol).await?.last;
        info!(%symbol, %size, entry, order_id = %receipt.order_id, "entry");
        self.notifier
            .notify(&format!("BUY {symbol} qty={size} ({})", signal.reason))
            .await;

        self.state.track(Position::new(&symbol, entry, size));
        self.announce_exit_arming(&symbol, entry).await;
        self.start_cooldown(&symbol, now);

        Ok(EvalOutcome::Entered { symbol, size })
    }

    /// Resolve a configured symbol against the listing, falling back to
    /// another configured quote that lists the same base.
    fn resolve_symbol(
        &self,
        listing: &HashMap<String, Instrument>,
        configured: &str,
    ) -> Option<String> {
        if listing.contains_key(configured) {
            return Some(configured.to_string());
        }

        let base = configured.split('-').next()?;
        for quote in &self.config.trading.quotes {
            let alternative = format!("{base}-{quote}");
            if listing.contains_key(&alternative) {
                info!(%configured, %alternative, "falling back to alternative listing");
                return Some(alternative);
            }
        }
        None
    }

    async fn place_with_retry(
        &self,
        request: OrderRequest,
    ) -> Result<OrderReceipt, GatewayError> {
        let gateway = &self.gateway;
        self.retry
            .run(|| gateway.place_order(request.clone()))
            .await
    }

    async fn announce_exit_arming(&self, symbol: &str, entry: f64) {
        if !self.config.trading.enable_tp_sl {
            return;
        }
        let tp = self.exit_rule.take_profit_price(entry);
        let sl = self.exit_rule.stop_loss_price(entry);
        info!(%symbol, tp, sl, "exit thresholds armed");
        self.notifier
            .notify(&format!("{symbol} exits armed: TP~{tp:.6} / SL~{sl:.6}"))
            .await;
    }

    /// Free balance of a currency minus its configured reserve.
    async fn free_after_reserve(&self, currency: &str) -> Result<Decimal, GatewayError> {
        let balance = self
            .gateway
            .balance(AccountType::Trade, currency)
            .await?;
        let reserve = self
            .config
            .trading
            .reserve
            .get(currency)
            .copied()
            .unwrap_or(Decimal::ZERO);
        Ok((balance - reserve).max(Decimal::ZERO))
    }

    async fn quote_balances(&self) -> Result<HashMap<String, Decimal>, GatewayError> {
        let mut balances = HashMap::new();
        for quote in &self.config.trading.quotes {
            let balance = self.gateway.balance(AccountType::Trade, quote).await?;
            balances.insert(quote.clone(), balance);
        }
        Ok(balances)
    }

    fn start_cooldown(&mut self, symbol: &str, now: DateTime<Utc>) {
        let until = now + ChronoDuration::seconds(self.config.trading.cooldown_secs as i64);
        self.state.start_cooldown(symbol, until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use coinflow_exchange::PaperExchange;
    use coinflow_signals::{EnsembleConfig, RegimeConfig};
    use rust_decimal_macros::dec;

    struct NullNotifier;

    #[async_trait]
    impl Notifier for NullNotifier {
        async fn notify(&self, _message: &str) {}
    }

    fn shutdown_flag() -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(false))
    }

    /// Short indicator periods so decisions are hand-computable, and a
    /// regime window the 61-candle histories below can satisfy.
    fn test_config() -> BotConfig {
        let mut config = BotConfig::default();
        config.trading.quotes = vec!["USDT".to_string(), "BTC".to_string()];
        config.trading.symbols = vec!["ETH-USDT".to_string()];
        config.trading.reserve = HashMap::new();
        config.ensemble = EnsembleConfig {
            ema_fast: 2,
            ema_slow: 4,
            breakout_lookback: 3,
            min_closes: 10,
            ..Default::default()
        };
        config.regime = RegimeConfig {
            trend_ema_period: 20,
            adx_period: 14,
            min_adx: 1.0,
        };
        config
    }

    fn flat_candles(n: usize, close: f64) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                Candle::new(i as i64 * 900_000, close, close + 0.5, close - 0.5, close, 1000.0)
            })
            .collect()
    }

    /// Flat history with one strong up bar at the end: the short-period
    /// ensemble votes buy 2-1.
    fn buy_signal_candles() -> Vec<Candle> {
        let mut candles = flat_candles(60, 100.0);
        candles.push(Candle::new(60 * 900_000, 100.0, 110.5, 99.5, 110.0, 1000.0));
        candles
    }

    /// Flat history with one strong down bar at the end: sell 2-1.
    fn sell_signal_candles() -> Vec<Candle> {
        let mut candles = flat_candles(60, 100.0);
        candles.push(Candle::new(60 * 900_000, 100.0, 100.5, 89.5, 90.0, 1000.0));
        candles
    }

    fn eth_instrument() -> Instrument {
        Instrument::new("ETH-USDT", dec!(0.01), dec!(0.0001), dec!(1))
    }

    fn flat_ticker(price: f64) -> Ticker {
        Ticker {
            best_bid: price,
            best_ask: price,
            last: price,
        }
    }

    fn entry_venue() -> PaperExchange {
        PaperExchange::new()
            .with_instrument(eth_instrument())
            .with_ticker("ETH-USDT", flat_ticker(110.0))
            .with_candles("ETH-USDT", buy_signal_candles())
            .with_balance("USDT", dec!(10_000))
    }

    #[tokio::test]
    async fn test_buy_signal_opens_position() {
        let mut engine = Engine::new(test_config(), entry_venue(), NullNotifier, shutdown_flag());
        engine.run_cycle().await.unwrap();

        let orders = engine.gateway().orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].request.symbol, "ETH-USDT");
        assert_eq!(orders[0].request.side, Side::Buy);

        assert!(engine.state().has_position("ETH-USDT"));
        assert!(engine.state().in_cooldown("ETH-USDT", Utc::now()));
    }

    #[tokio::test]
    async fn test_regime_off_suppresses_entry() {
        // Same buy votes, but the 200-bar trend window cannot be met by
        // a 61-candle history: regime reads off, no entry is attempted
        let mut config = test_config();
        config.regime = RegimeConfig::default();

        let mut engine = Engine::new(config, entry_venue(), NullNotifier, shutdown_flag());
        engine.run_cycle().await.unwrap();

        assert!(engine.gateway().orders().is_empty());
        assert!(!engine.state().has_position("ETH-USDT"));
    }

    #[tokio::test]
    async fn test_cooldown_blocks_second_entry() {
        let mut engine = Engine::new(test_config(), entry_venue(), NullNotifier, shutdown_flag());
        engine.run_cycle().await.unwrap();
        assert_eq!(engine.gateway().orders().len(), 1);

        // Next cycle is inside the cooldown window; the held base balance
        // would block re-entry anyway
        engine.run_cycle().await.unwrap();
        assert_eq!(engine.gateway().orders().len(), 1);
    }

    #[tokio::test]
    async fn test_held_balance_blocks_stacking() {
        // A held base balance is adopted as a position, and the entry
        // gate then refuses to stack on top of it
        let venue = entry_venue().with_balance("ETH", dec!(2));
        let mut engine = Engine::new(test_config(), venue, NullNotifier, shutdown_flag());
        engine.run_cycle().await.unwrap();

        assert!(engine.gateway().orders().is_empty());
        assert!(engine.state().has_position("ETH-USDT"));
        let position = engine.state().position("ETH-USDT").unwrap();
        assert_eq!(position.size, dec!(2));
    }

    #[tokio::test]
    async fn test_take_profit_exit() {
        // Flat history: the ensemble abstains, the TP/SL supervisor does
        // all the work
        let venue = PaperExchange::new()
            .with_instrument(eth_instrument())
            .with_ticker("ETH-USDT", flat_ticker(110.0))
            .with_candles("ETH-USDT", flat_candles(61, 110.0))
            .with_balance("USDT", dec!(1000))
            .with_balance("ETH", dec!(2));

        let mut engine = Engine::new(test_config(), venue, NullNotifier, shutdown_flag());

        // Cycle 1: position inferred from the held balance at entry ~110
        engine.run_cycle().await.unwrap();
        assert!(engine.state().has_position("ETH-USDT"));
        assert!(engine.gateway().orders().is_empty());

        // Price clears entry * 1.015
        engine.gateway().set_ticker("ETH-USDT", flat_ticker(112.0));
        engine.run_cycle().await.unwrap();

        let orders = engine.gateway().orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].request.side, Side::Sell);
        assert_eq!(orders[0].request.size, dec!(2));
        assert!(!engine.state().has_position("ETH-USDT"));
        assert!(engine.state().in_cooldown("ETH-USDT", Utc::now()));
    }

    #[tokio::test]
    async fn test_stop_loss_exit() {
        let venue = PaperExchange::new()
            .with_instrument(eth_instrument())
            .with_ticker("ETH-USDT", flat_ticker(110.0))
            .with_candles("ETH-USDT", flat_candles(61, 110.0))
            .with_balance("USDT", dec!(1000))
            .with_balance("ETH", dec!(2));

        let mut engine = Engine::new(test_config(), venue, NullNotifier, shutdown_flag());
        engine.run_cycle().await.unwrap();
        assert!(engine.state().has_position("ETH-USDT"));

        // Price breaks entry * 0.99
        engine.gateway().set_ticker("ETH-USDT", flat_ticker(108.0));
        engine.run_cycle().await.unwrap();

        let orders = engine.gateway().orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].request.side, Side::Sell);
        assert!(!engine.state().has_position("ETH-USDT"));
    }

    #[tokio::test]
    async fn test_sell_signal_exits_in_full() {
        let venue = PaperExchange::new()
            .with_instrument(eth_instrument())
            .with_ticker("ETH-USDT", flat_ticker(90.0))
            .with_candles("ETH-USDT", sell_signal_candles())
            .with_balance("USDT", dec!(1000))
            .with_balance("ETH", dec!(2));

        let mut engine = Engine::new(test_config(), venue, NullNotifier, shutdown_flag());
        engine.run_cycle().await.unwrap();

        let orders = engine.gateway().orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].request.side, Side::Sell);
        assert_eq!(orders[0].request.size, dec!(2));
        assert!(!engine.state().has_position("ETH-USDT"));
        assert!(engine.state().in_cooldown("ETH-USDT", Utc::now()));
    }

    #[tokio::test]
    async fn test_entry_routes_liquidity_when_quote_is_short() {
        // 5 USDT free, 10 needed: the router sells BTC for USDT first
        let venue = PaperExchange::new()
            .with_instrument(eth_instrument())
            .with_instrument(Instrument::new(
                "BTC-USDT",
                dec!(0.1),
                dec!(0.0001),
                dec!(1),
            ))
            .with_ticker("ETH-USDT", flat_ticker(110.0))
            .with_ticker("BTC-USDT", flat_ticker(50_000.0))
            .with_candles("ETH-USDT", buy_signal_candles())
            .with_balance("USDT", dec!(5))
            .with_balance("BTC", dec!(0.01));

        let mut engine = Engine::new(test_config(), venue, NullNotifier, shutdown_flag());
        engine.run_cycle().await.unwrap();

        let orders = engine.gateway().orders();
        assert_eq!(orders.len(), 2, "expected conversion then entry");

        assert_eq!(orders[0].request.symbol, "BTC-USDT");
        assert_eq!(orders[0].request.side, Side::Sell);
        assert_eq!(orders[0].request.size, dec!(0.0001));

        assert_eq!(orders[1].request.symbol, "ETH-USDT");
        assert_eq!(orders[1].request.side, Side::Buy);
        assert!(engine.state().has_position("ETH-USDT"));
    }

    #[tokio::test]
    async fn test_no_route_skips_entry() {
        // Quote is short and no pair bridges BTC to USDT
        let venue = PaperExchange::new()
            .with_instrument(eth_instrument())
            .with_ticker("ETH-USDT", flat_ticker(110.0))
            .with_candles("ETH-USDT", buy_signal_candles())
            .with_balance("USDT", dec!(5))
            .with_balance("BTC", dec!(0.01));

        let mut engine = Engine::new(test_config(), venue, NullNotifier, shutdown_flag());
        engine.run_cycle().await.unwrap();

        assert!(engine.gateway().orders().is_empty());
        assert!(!engine.state().has_position("ETH-USDT"));
    }

    #[tokio::test]
    async fn test_unlisted_symbol_falls_back_to_other_quote() {
        // ETH-USDT is configured but only ETH-BTC is listed; the engine
        // falls back and trades the BTC-quoted pair
        let mut config = test_config();
        config.trading.quotes = vec!["USDT".to_string(), "BTC".to_string()];
        config.trading.min_trade_notional = dec!(0.0001);

        let venue = PaperExchange::new()
            .with_instrument(Instrument::new(
                "ETH-BTC",
                dec!(0.000001),
                dec!(0.0001),
                dec!(0),
            ))
            .with_ticker("ETH-BTC", flat_ticker(0.05))
            .with_candles("ETH-BTC", buy_signal_candles())
            .with_balance("BTC", dec!(1));

        let mut engine = Engine::new(config, venue, NullNotifier, shutdown_flag());
        engine.run_cycle().await.unwrap();

        let orders = engine.gateway().orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].request.symbol, "ETH-BTC");
        assert!(engine.state().has_position("ETH-BTC"));
    }

    #[tokio::test]
    async fn test_wide_spread_skips_instrument() {
        let venue = PaperExchange::new()
            .with_instrument(eth_instrument())
            .with_ticker(
                "ETH-USDT",
                Ticker {
                    best_bid: 100.0,
                    best_ask: 103.0,
                    last: 101.5,
                },
            )
            .with_candles("ETH-USDT", buy_signal_candles())
            .with_balance("USDT", dec!(10_000));

        let mut engine = Engine::new(test_config(), venue, NullNotifier, shutdown_flag());
        engine.run_cycle().await.unwrap();

        assert!(engine.gateway().orders().is_empty());
    }

    #[tokio::test]
    async fn test_low_volatility_skips_instrument() {
        let venue = PaperExchange::new()
            .with_instrument(eth_instrument())
            .with_ticker("ETH-USDT", flat_ticker(110.0))
            // Dead-flat candles: ATR% is ~0.09, under the 0.3 floor
            .with_candles(
                "ETH-USDT",
                (0..61)
                    .map(|i| Candle::new(i as i64 * 900_000, 110.0, 110.05, 109.95, 110.0, 1000.0))
                    .collect(),
            )
            .with_balance("USDT", dec!(10_000));

        let mut engine = Engine::new(test_config(), venue, NullNotifier, shutdown_flag());
        engine.run_cycle().await.unwrap();

        assert!(engine.gateway().orders().is_empty());
    }
}

