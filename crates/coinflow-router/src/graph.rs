//! Currency convertibility graph.

use coinflow_core::types::Instrument;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// Directed adjacency over currencies, derived from the instrument
/// listing.
///
/// Every listed pair "BASE-QUOTE" contributes BASE→QUOTE (sell BASE to
/// obtain QUOTE) and QUOTE→BASE (buy BASE paying QUOTE). The graph is a
/// cheap per-cycle value: it is rebuilt from each listing snapshot and
/// never mutated in place. Ordered maps keep edge iteration — and so
/// equal-length path tie-breaks — lexicographic and deterministic.
#[derive(Debug, Clone, Default)]
pub struct QuoteGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl QuoteGraph {
    /// Build the graph from a listing snapshot.
    pub fn from_listing(listing: &HashMap<String, Instrument>) -> Self {
        let mut edges: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for instrument in listing.values() {
            if instrument.base.is_empty() || instrument.quote.is_empty() {
                continue;
            }
            edges
                .entry(instrument.base.clone())
                .or_default()
                .insert(instrument.quote.clone());
            edges
                .entry(instrument.quote.clone())
                .or_default()
                .insert(instrument.base.clone());
        }
        Self { edges }
    }

    /// Currencies reachable from `currency` in one conversion.
    pub fn neighbors(&self, currency: &str) -> impl Iterator<Item = &str> {
        self.edges
            .get(currency)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Shortest conversion path from `from` to `to`, bounded by
    /// `max_hops` conversions.
    ///
    /// Breadth-first search: the first path found is shortest in hop
    /// count. Returns `None` when no path exists within the bound.
    pub fn find_path(&self, from: &str, to: &str, max_hops: usize) -> Option<Vec<String>> {
        if from == to {
            return Some(vec![from.to_string()]);
        }
        if max_hops == 0 {
            return None;
        }

        let mut visited: BTreeSet<&str> = BTreeSet::new();
        visited.insert(from);

        let mut queue: VecDeque<Vec<&str>> = VecDeque::new();
        queue.push_back(vec![from]);

        while let Some(path) = queue.pop_front() {
            let hops_used = path.len() - 1;
            if hops_used >= max_hops {
                continue;
            }
            let current = *path.last().expect("paths are never empty");

            for next in self.neighbors(current) {
                if visited.contains(next) {
                    continue;
                }
                let mut extended = path.clone();
                extended.push(next);

                if next == to {
                    return Some(extended.into_iter().map(str::to_string).collect());
                }

                visited.insert(next);
                queue.push_back(extended);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn listing(symbols: &[&str]) -> HashMap<String, Instrument> {
        symbols
            .iter()
            .map(|s| {
                (
                    s.to_string(),
                    Instrument::new(*s, Decimal::ONE, Decimal::ONE, Decimal::ZERO),
                )
            })
            .collect()
    }

    #[test]
    fn test_edges_both_directions() {
        let graph = QuoteGraph::from_listing(&listing(&["BTC-USDT"]));
        assert!(graph.neighbors("BTC").any(|c| c == "USDT"));
        assert!(graph.neighbors("USDT").any(|c| c == "BTC"));
    }

    #[test]
    fn test_two_hop_path() {
        let graph = QuoteGraph::from_listing(&listing(&["BTC-USDT", "ETH-BTC"]));
        let path = graph.find_path("ETH", "USDT", 2).unwrap();
        assert_eq!(path, vec!["ETH", "BTC", "USDT"]);
    }

    #[test]
    fn test_no_path_to_isolated_currency() {
        let graph = QuoteGraph::from_listing(&listing(&["BTC-USDT", "ETH-BTC"]));
        assert!(graph.find_path("ETH", "EUR", 3).is_none());
    }

    #[test]
    fn test_hop_bound_respected() {
        let graph = QuoteGraph::from_listing(&listing(&["BTC-USDT", "ETH-BTC"]));
        assert!(graph.find_path("ETH", "USDT", 1).is_none());
        assert!(graph.find_path("ETH", "USDT", 2).is_some());
    }

    #[test]
    fn test_direct_path_preferred_over_longer() {
        let graph = QuoteGraph::from_listing(&listing(&["BTC-USDT", "ETH-BTC", "ETH-USDT"]));
        let path = graph.find_path("ETH", "USDT", 3).unwrap();
        assert_eq!(path, vec!["ETH", "USDT"]);
    }

    #[test]
    fn test_trivial_path() {
        let graph = QuoteGraph::from_listing(&listing(&["BTC-USDT"]));
        assert_eq!(graph.find_path("USDT", "USDT", 3).unwrap(), vec!["USDT"]);
    }
}
