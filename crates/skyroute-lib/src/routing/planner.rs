//! Bounded-hop search strategies behind a common trait.
//!
//! Each strategy is a small struct implementing [`HopSearch`]; callers pick
//! one by name through [`select_planner`].

use crate::airport::{AirportCatalog, AirportId};
use crate::graph::Graph;
use crate::path::{bounded_search, SearchOutcome, SearchStrategy};

/// Trait for bounded-hop search strategies.
pub trait HopSearch: Send + Sync {
    /// Strategy identifier for this planner.
    fn algorithm(&self) -> SearchStrategy;

    /// Shortest distances from `source` using at most `hop_ceiling` legs.
    fn search(
        &self,
        graph: &Graph,
        catalog: &AirportCatalog,
        source: AirportId,
        hop_ceiling: usize,
    ) -> SearchOutcome {
        bounded_search(source, hop_ceiling, graph, catalog, self.algorithm())
    }
}

/// Enumerates every path within the hop ceiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustivePlanner;

impl HopSearch for ExhaustivePlanner {
    fn algorithm(&self) -> SearchStrategy {
        SearchStrategy::Exhaustive
    }
}

/// Drops dominated partial paths using only its own table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfPrunedPlanner;

impl HopSearch for SelfPrunedPlanner {
    fn algorithm(&self) -> SearchStrategy {
        SearchStrategy::SelfPruned
    }
}

/// Additionally prunes against a Dijkstra table computed per query.
#[derive(Debug, Clone, Copy, Default)]
pub struct OraclePrunedPlanner;

impl HopSearch for OraclePrunedPlanner {
    fn algorithm(&self) -> SearchStrategy {
        SearchStrategy::OraclePruned
    }
}

/// Select the planner for a strategy.
pub fn select_planner(strategy: SearchStrategy) -> Box<dyn HopSearch> {
    match strategy {
        SearchStrategy::Exhaustive => Box::new(ExhaustivePlanner),
        SearchStrategy::SelfPruned => Box::new(SelfPrunedPlanner),
        SearchStrategy::OraclePruned => Box::new(OraclePrunedPlanner),
    }
}
