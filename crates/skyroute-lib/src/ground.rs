//! Ground connections between nearby airports and the ground-augmented graph.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::airport::{AirportCatalog, AirportId};
use crate::graph::{Graph, GraphMode, Route};
use crate::spatial::AirportIndex;

/// Airports at most this far apart (great-circle, km) are ground-connected.
pub const GROUND_HOP_MAX_DISTANCE_KM: f64 = 100.0;

/// One side of a ground connection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroundLink {
    pub airport: AirportId,
    pub distance: f64,
}

/// Symmetric relation of airports within the ground threshold of each other.
#[derive(Debug, Clone, Default)]
pub struct GroundConnections {
    links: HashMap<AirportId, Vec<GroundLink>>,
    max_km: f64,
}

impl GroundConnections {
    /// Ground neighbours of an airport in catalog order.
    pub fn neighbours(&self, airport: AirportId) -> &[GroundLink] {
        self.links
            .get(&airport)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of unordered airport pairs.
    pub fn pair_count(&self) -> usize {
        self.links.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Threshold the relation was computed with.
    pub fn max_km(&self) -> f64 {
        self.max_km
    }
}

/// Options for building the ground-augmented graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphBuildOptions {
    pub ground_hop_max_km: f64,
}

impl Default for GraphBuildOptions {
    fn default() -> Self {
        Self {
            ground_hop_max_km: GROUND_HOP_MAX_DISTANCE_KM,
        }
    }
}

/// Every pair of distinct airports within `max_km` of each other, recorded in
/// both directions.
///
/// Candidates come from a KD-tree radius query and are confirmed with the
/// haversine distance, so the result matches an all-pairs scan.
pub fn find_ground_connections(catalog: &AirportCatalog, max_km: f64) -> GroundConnections {
    let index = AirportIndex::build(catalog);
    let airports = catalog.airports();
    let mut links: HashMap<AirportId, Vec<GroundLink>> = HashMap::new();

    for (position, airport) in airports.iter().enumerate() {
        for candidate in index.candidates_within(airport.location, max_km) {
            if candidate == position {
                continue;
            }
            let other = &airports[candidate];
            if other.id == airport.id {
                continue;
            }
            let distance = airport.location.distance_to(&other.location);
            if distance <= max_km {
                links.entry(airport.id).or_default().push(GroundLink {
                    airport: other.id,
                    distance,
                });
            }
        }
    }

    let connections = GroundConnections { links, max_km };
    debug!(
        pairs = connections.pair_count(),
        max_km, "computed ground connections"
    );
    connections
}

/// Extend `graph` with ground continuations.
///
/// For every edge `S -> D` and every ground neighbour `G` of `D`, adds
/// `S -> G` with the summed distance and `ground_hop_from = D`. The input
/// graph is left untouched.
pub fn augment_with_ground_hops(graph: &Graph, connections: &GroundConnections) -> Graph {
    let mut adjacency: HashMap<AirportId, Vec<Route>> = HashMap::new();
    let mut synthesised = 0usize;

    // Per-source order is preserved, and synthesised edges go after every
    // flight of the same source, so the stable re-sort keeps flights ahead of
    // equal-distance continuations.
    for route in graph.routes() {
        adjacency.entry(route.source).or_default().push(*route);
    }

    for routes in adjacency.values_mut() {
        let continuations: Vec<Route> = routes
            .iter()
            .flat_map(|route| {
                connections
                    .neighbours(route.destination)
                    .iter()
                    .map(move |link| Route {
                        source: route.source,
                        destination: link.airport,
                        distance: route.distance + link.distance,
                        ground_hop_from: Some(route.destination),
                    })
            })
            .collect();
        synthesised += continuations.len();
        routes.extend(continuations);
    }

    let augmented = Graph::from_adjacency(GraphMode::GroundAugmented, adjacency);
    debug!(
        edges = augmented.edge_count(),
        synthesised, "built ground-augmented graph"
    );
    augmented
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::tests::airport;
    use crate::data::RawRoute;
    use crate::graph::{build_graph, EdgeKind};

    // Test airports sit on the equator, `id / 100` degrees east.
    fn catalog() -> AirportCatalog {
        AirportCatalog::new(vec![
            airport(1, Some("AAA"), None),
            airport(200, Some("BBB"), None),
            airport(250, Some("CCC"), None),
            airport(900, Some("DDD"), None),
        ])
    }

    #[test]
    fn connections_are_symmetric_and_thresholded() {
        let catalog = catalog();
        let connections = find_ground_connections(&catalog, GROUND_HOP_MAX_DISTANCE_KM);
        assert_eq!(connections.pair_count(), 1);

        let from_b = connections.neighbours(200);
        let from_c = connections.neighbours(250);
        assert_eq!(from_b.len(), 1);
        assert_eq!(from_b[0].airport, 250);
        assert_eq!(from_c[0].airport, 200);
        assert_eq!(from_b[0].distance, from_c[0].distance);
        assert!(connections.neighbours(900).is_empty());
    }

    #[test]
    fn matches_all_pairs_scan() {
        let catalog = catalog();
        for max_km in [0.0, 50.0, 60.0, 250.0, 1000.0] {
            let connections = find_ground_connections(&catalog, max_km);
            let airports = catalog.airports();
            let mut expected = 0;
            for (i, a) in airports.iter().enumerate() {
                for b in &airports[i + 1..] {
                    if a.location.distance_to(&b.location) <= max_km {
                        expected += 1;
                    }
                }
            }
            assert_eq!(connections.pair_count(), expected, "max_km = {max_km}");
        }
    }

    #[test]
    fn augmentation_adds_continuations_only_to_the_copy() {
        let catalog = catalog();
        let base = build_graph(&catalog, &[RawRoute::new(1, 200)]);
        let connections = find_ground_connections(&catalog, GROUND_HOP_MAX_DISTANCE_KM);
        let augmented = augment_with_ground_hops(&base, &connections);

        assert_eq!(base.edge_count(), 1);
        assert_eq!(augmented.edge_count(), 2);
        assert_eq!(augmented.mode(), GraphMode::GroundAugmented);

        let routes = augmented.neighbours(1);
        assert_eq!(routes[0].kind(), EdgeKind::Flight);
        let continuation = routes[1];
        assert_eq!(continuation.destination, 250);
        assert_eq!(continuation.ground_hop_from, Some(200));
        let ground = connections.neighbours(200)[0].distance;
        assert_eq!(continuation.distance, routes[0].distance + ground);
    }
}
