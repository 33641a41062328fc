use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::airport::{AirportCatalog, AirportId};
use crate::error::Error;
use crate::graph::{Graph, Route};

use super::dijkstra::dijkstra_table;
use super::ShortestDistanceTable;

/// How aggressively the bounded search discards partial paths.
///
/// Every strategy yields the same distances; they differ in how many partial
/// paths are explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    /// Enumerate every path of at most the hop ceiling.
    Exhaustive,
    /// Drop a path that neither improved its airport nor used fewer hops than
    /// the recorded best.
    SelfPruned,
    /// As `SelfPruned`, and additionally drop a path unless the unconstrained
    /// shortest path to its airport uses more hops, or the path already
    /// matches the unconstrained distance.
    #[default]
    OraclePruned,
}

impl SearchStrategy {
    pub const ALL: [SearchStrategy; 3] = [
        SearchStrategy::Exhaustive,
        SearchStrategy::SelfPruned,
        SearchStrategy::OraclePruned,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SearchStrategy::Exhaustive => "exhaustive",
            SearchStrategy::SelfPruned => "self-pruned",
            SearchStrategy::OraclePruned => "oracle-pruned",
        }
    }

    fn prunes_dominated(self) -> bool {
        !matches!(self, SearchStrategy::Exhaustive)
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownStrategy {
                name: s.to_string(),
            })
    }
}

/// Result of a bounded search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub table: ShortestDistanceTable,
    /// Number of partial paths taken off the stack.
    pub explored: usize,
}

struct PartialPath {
    distance: f64,
    hops: Vec<Route>,
}

/// Shortest distances from `source` using at most `hop_ceiling` legs.
///
/// Depth-first enumeration over a stack of partial paths. The table entry for
/// an airport is replaced whenever a path strictly improves it, whether or not
/// that path is extended further. A ceiling of zero reaches only the source.
pub fn bounded_search(
    source: AirportId,
    hop_ceiling: usize,
    graph: &Graph,
    catalog: &AirportCatalog,
    strategy: SearchStrategy,
) -> SearchOutcome {
    let oracle = match strategy {
        SearchStrategy::OraclePruned => Some(dijkstra_table(source, catalog, graph)),
        _ => None,
    };

    let mut table = ShortestDistanceTable::unreached(source, catalog);
    let mut stack: Vec<PartialPath> = Vec::new();
    if hop_ceiling > 0 {
        stack.push(PartialPath {
            distance: 0.0,
            hops: Vec::new(),
        });
    }

    let mut explored = 0usize;
    while let Some(path) = stack.pop() {
        explored += 1;
        let end = path.hops.last().map_or(source, |route| route.destination);

        for route in graph.neighbours(end) {
            let target = route.destination;
            let distance = path.distance + route.distance;
            let hop_count = path.hops.len() + 1;
            let recorded_hops = table.hops(target).len();
            let improved = distance < table.distance(target);
            let extendable = hop_count < hop_ceiling;

            if !improved && !extendable {
                continue;
            }

            let mut hops = Vec::with_capacity(hop_count);
            hops.extend_from_slice(&path.hops);
            hops.push(*route);

            if improved {
                table.record(target, distance, hops.clone());
            }

            if !extendable {
                continue;
            }

            if strategy.prunes_dominated() && !improved && hop_count >= recorded_hops {
                continue;
            }

            if let Some(oracle) = &oracle {
                let fewer_hops_possible = oracle.hops(target).len() > hop_count;
                let already_optimal = oracle.distance(target) == distance;
                if !fewer_hops_possible && !already_optimal {
                    continue;
                }
            }

            stack.push(PartialPath { distance, hops });
        }
    }

    trace!(source, hop_ceiling, %strategy, explored, "bounded search finished");
    SearchOutcome { table, explored }
}

/// Hop-bounded shortest distances using the oracle-pruned strategy.
pub fn shortest_distances(
    source: AirportId,
    hop_ceiling: usize,
    graph: &Graph,
    catalog: &AirportCatalog,
) -> ShortestDistanceTable {
    bounded_search(
        source,
        hop_ceiling,
        graph,
        catalog,
        SearchStrategy::OraclePruned,
    )
    .table
}
