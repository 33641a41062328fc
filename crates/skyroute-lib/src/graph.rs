use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::airport::{AirportCatalog, AirportId};
use crate::data::RawRoute;

/// Routing graph variants built at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphMode {
    /// Direct flights only.
    Flights,
    /// Direct flights plus synthesised ground continuations.
    GroundAugmented,
}

/// Classification for a leg of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Flight,
    GroundContinuation,
}

/// Directed, weighted edge between two airports.
///
/// `ground_hop_from` is set only on synthesised edges and names the airport
/// where the flight lands before the ground transfer to `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Route {
    pub source: AirportId,
    pub destination: AirportId,
    pub distance: f64,
    pub ground_hop_from: Option<AirportId>,
}

impl Route {
    pub fn flight(source: AirportId, destination: AirportId, distance: f64) -> Self {
        Self {
            source,
            destination,
            distance,
            ground_hop_from: None,
        }
    }

    pub fn kind(&self) -> EdgeKind {
        if self.ground_hop_from.is_some() {
            EdgeKind::GroundContinuation
        } else {
            EdgeKind::Flight
        }
    }
}

/// Edge index grouped by source airport, each list sorted by ascending distance.
#[derive(Debug, Clone)]
pub struct Graph {
    mode: GraphMode,
    adjacency: Arc<HashMap<AirportId, Vec<Route>>>,
}

impl Graph {
    pub(crate) fn from_adjacency(
        mode: GraphMode,
        mut adjacency: HashMap<AirportId, Vec<Route>>,
    ) -> Self {
        for routes in adjacency.values_mut() {
            sort_by_distance(routes);
        }
        Self {
            mode,
            adjacency: Arc::new(adjacency),
        }
    }

    /// Mode that produced this graph.
    pub fn mode(&self) -> GraphMode {
        self.mode
    }

    /// Outgoing routes of an airport, cheapest first.
    pub fn neighbours(&self, airport: AirportId) -> &[Route] {
        self.adjacency
            .get(&airport)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Iterate over every edge, in no particular source order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.adjacency.values().flatten()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            mode: GraphMode::Flights,
            adjacency: Arc::new(HashMap::new()),
        }
    }
}

/// Stable sort, so equal distances keep their insertion order.
fn sort_by_distance(routes: &mut [Route]) {
    routes.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// Build the flight-only edge index.
///
/// Records with an endpoint missing from the catalog are skipped. Repeated
/// ordered pairs keep their first occurrence. Edge weight is the great-circle
/// distance between the endpoints.
pub fn build_graph(catalog: &AirportCatalog, raw_routes: &[RawRoute]) -> Graph {
    let mut adjacency: HashMap<AirportId, Vec<Route>> = HashMap::new();
    let mut seen: HashSet<(AirportId, AirportId)> = HashSet::with_capacity(raw_routes.len());
    let mut unresolved = 0usize;
    let mut duplicates = 0usize;

    for raw in raw_routes {
        let (Some(source), Some(destination)) =
            (catalog.get(raw.source_id), catalog.get(raw.destination_id))
        else {
            unresolved += 1;
            continue;
        };

        if !seen.insert((source.id, destination.id)) {
            duplicates += 1;
            continue;
        }

        let distance = source.location.distance_to(&destination.location);
        adjacency
            .entry(source.id)
            .or_default()
            .push(Route::flight(source.id, destination.id, distance));
    }

    let graph = Graph::from_adjacency(GraphMode::Flights, adjacency);
    debug!(
        edges = graph.edge_count(),
        unresolved, duplicates, "built flight graph"
    );
    graph
}
