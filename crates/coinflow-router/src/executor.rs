//! Route planning and hop-by-hop conversion execution.

use crate::graph::QuoteGraph;
use coinflow_core::error::GatewayError;
use coinflow_core::traits::ExchangeGateway;
use coinflow_core::types::{AccountType, Instrument, OrderRequest, Side};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{info, warn};

/// A planned conversion: where to pull value from and the path to walk.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    /// Currency the value starts in
    pub source: String,
    /// Currency sequence from source to target, inclusive
    pub path: Vec<String>,
}

/// Finds and executes conversion routes between settlement currencies.
pub struct RouteExecutor {
    max_hops: usize,
}

impl RouteExecutor {
    /// Create an executor with the given hop bound.
    pub fn new(max_hops: usize) -> Self {
        Self { max_hops }
    }

    /// Pick a source currency and path toward `target`.
    ///
    /// Candidates are the other configured quotes ordered by descending
    /// free balance; the first with a positive balance and a path within
    /// the hop bound wins.
    pub fn plan(
        &self,
        graph: &QuoteGraph,
        target: &str,
        quotes: &[String],
        balances: &HashMap<String, Decimal>,
    ) -> Option<RoutePlan> {
        let mut candidates: Vec<(&String, Decimal)> = quotes
            .iter()
            .filter(|q| q.as_str() != target)
            .map(|q| (q, balances.get(q).copied().unwrap_or(Decimal::ZERO)))
            .filter(|(_, bal)| *bal > Decimal::ZERO)
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1));

        for (source, _) in candidates {
            if let Some(path) = graph.find_path(source, target, self.max_hops) {
                return Some(RoutePlan {
                    source: source.clone(),
                    path,
                });
            }
        }
        None
    }

    /// Execute a planned route, converting up to `needed` units of the
    /// target currency.
    ///
    /// The committed amount is capped at min(source balance, the need
    /// translated into source units by chaining quoted hop prices
    /// backward). Each hop prefers the direct "sell FROM for TO" market
    /// and falls back to "buy TO paying FROM". A hop with neither market
    /// or an empty book stops execution early; conversions already done
    /// are real balance changes and are not rolled back. The carried
    /// amount is updated from the quoted price, not the actual fill, so
    /// it can drift slightly from the real balance; over-conversion
    /// beyond the immediate need is accepted and not refunded.
    ///
    /// Returns the approximate amount delivered in the final currency
    /// reached (zero when nothing was executed).
    pub async fn convert<G: ExchangeGateway>(
        &self,
        gateway: &G,
        listing: &HashMap<String, Instrument>,
        path: &[String],
        needed: Decimal,
    ) -> Result<Decimal, GatewayError> {
        if path.len() < 2 || needed <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let Some(required) = self
            .estimate_source_amount(gateway, listing, path, needed)
            .await?
        else {
            warn!(path = ?path, "route has an unusable hop, nothing converted");
            return Ok(Decimal::ZERO);
        };

        let source = &path[0];
        let balance = gateway.balance(AccountType::Trade, source).await?;
        let mut carry = balance.min(required);
        if carry <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        for hop in path.windows(2) {
            let (from, to) = (&hop[0], &hop[1]);
            let sell_symbol = format!("{from}-{to}");
            let buy_symbol = format!("{to}-{from}");

            if let Some(instrument) = listing.get(&sell_symbol) {
                let ticker = gateway.ticker(&sell_symbol).await?;
                let Some(bid) = decimal_price(ticker.best_bid) else {
                    warn!(symbol = %sell_symbol, "empty book, route stops here");
                    break;
                };
                let size = instrument.snap_quantity(carry);
                if size <= Decimal::ZERO {
                    break;
                }
                info!(%sell_symbol, %size, "route hop: sell {from} for {to}");
                gateway
                    .place_order(OrderRequest::market(&sell_symbol, Side::Sell, size))
                    .await?;
                carry = size * bid;
            } else if let Some(instrument) = listing.get(&buy_symbol) {
                let ticker = gateway.ticker(&buy_symbol).await?;
                let Some(ask) = decimal_price(ticker.best_ask) else {
                    warn!(symbol = %buy_symbol, "empty book, route stops here");
                    break;
                };
                let size = instrument.snap_quantity(carry / ask);
                if size <= Decimal::ZERO {
                    break;
                }
                info!(%buy_symbol, %size, "route hop: buy {to} paying {from}");
                gateway
                    .place_order(OrderRequest::market(&buy_symbol, Side::Buy, size))
                    .await?;
                carry = size;
            } else {
                warn!(%from, %to, "no market for hop, route stops here");
                break;
            }
        }

        Ok(carry)
    }

    /// Translate the need at the destination into source-currency units
    /// by walking the hops backward on quoted prices. `None` when a hop
    /// has no usable market.
    async fn estimate_source_amount<G: ExchangeGateway>(
        &self,
        gateway: &G,
        listing: &HashMap<String, Instrument>,
        path: &[String],
        needed: Decimal,
    ) -> Result<Option<Decimal>, GatewayError> {
        let mut required = needed;

        for hop in path.windows(2).rev() {
            let (from, to) = (&hop[0], &hop[1]);
            let sell_symbol = format!("{from}-{to}");
            let buy_symbol = format!("{to}-{from}");

            if listing.contains_key(&sell_symbol) {
                let ticker = gateway.ticker(&sell_symbol).await?;
                let Some(bid) = decimal_price(ticker.best_bid) else {
                    return Ok(None);
                };
                required /= bid;
            } else if listing.contains_key(&buy_symbol) {
                let ticker = gateway.ticker(&buy_symbol).await?;
                let Some(ask) = decimal_price(ticker.best_ask) else {
                    return Ok(None);
                };
                required *= ask;
            } else {
                return Ok(None);
            }
        }

        Ok(Some(required))
    }
}

fn decimal_price(price: f64) -> Option<Decimal> {
    Decimal::from_f64(price).filter(|p| *p > Decimal::ZERO)
}
