use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::airport::{AirportCatalog, AirportId};
use crate::graph::Graph;

use super::ShortestDistanceTable;

/// Unconstrained single-source shortest distances, ignoring any hop ceiling.
///
/// Equal tentative distances are settled in ascending airport id order, and an
/// entry is only replaced by a strictly shorter path, so the first path relaxed
/// at a given distance is the one kept.
pub fn dijkstra_table(
    source: AirportId,
    catalog: &AirportCatalog,
    graph: &Graph,
) -> ShortestDistanceTable {
    let mut table = ShortestDistanceTable::unreached(source, catalog);
    let mut visited: HashSet<AirportId> = HashSet::new();
    let mut heap = BinaryHeap::new();
    heap.push(QueueEntry::new(source, 0.0));

    while let Some(QueueEntry { node, cost }) = heap.pop() {
        if !visited.insert(node) {
            continue;
        }

        let parent_hops = table.hops(node).to_vec();
        for route in graph.neighbours(node) {
            let next_cost = cost.0 + route.distance;
            if next_cost < table.distance(route.destination) {
                let mut hops = parent_hops.clone();
                hops.push(*route);
                table.record(route.destination, next_cost, hops);
                heap.push(QueueEntry::new(route.destination, next_cost));
            }
        }
    }

    table
}

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    node: AirportId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: AirportId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest cost, then the smallest id.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::tests::airport;
    use crate::airport::AirportCatalog;
    use crate::graph::{Graph, GraphMode, Route};
    use std::collections::HashMap;

    fn graph(edges: &[(AirportId, AirportId, f64)]) -> Graph {
        let mut adjacency: HashMap<AirportId, Vec<Route>> = HashMap::new();
        for &(source, destination, distance) in edges {
            adjacency
                .entry(source)
                .or_default()
                .push(Route::flight(source, destination, distance));
        }
        Graph::from_adjacency(GraphMode::Flights, adjacency)
    }

    fn catalog(ids: &[AirportId]) -> AirportCatalog {
        AirportCatalog::new(ids.iter().map(|&id| airport(id, None, None)).collect())
    }

    #[test]
    fn ignores_hop_count() {
        let catalog = catalog(&[1, 2, 3, 4]);
        let graph = graph(&[(1, 4, 10.0), (1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)]);
        let table = dijkstra_table(1, &catalog, &graph);

        assert_eq!(table.distance(1), 0.0);
        assert!(table.hops(1).is_empty());
        assert_eq!(table.distance(4), 3.0);
        assert_eq!(table.hops(4).len(), 3);
    }

    #[test]
    fn unreachable_airports_stay_infinite() {
        let catalog = catalog(&[1, 2, 3]);
        let graph = graph(&[(1, 2, 5.0), (3, 1, 1.0)]);
        let table = dijkstra_table(1, &catalog, &graph);

        assert!(table.distance(3).is_infinite());
        assert!(table.hops(3).is_empty());
        assert!(!table.is_reachable(3));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn equal_distances_keep_the_path_through_the_lower_id() {
        let catalog = catalog(&[1, 2, 3, 4]);
        let graph = graph(&[(1, 3, 1.0), (1, 2, 1.0), (2, 4, 1.0), (3, 4, 1.0)]);
        let table = dijkstra_table(1, &catalog, &graph);

        assert_eq!(table.distance(4), 2.0);
        assert_eq!(table.hops(4)[0].destination, 2);
    }
}
