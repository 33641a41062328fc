//! Shortest-distance tables and the searches that fill them.

use std::collections::HashMap;

use serde::Serialize;

use crate::airport::{AirportCatalog, AirportId};
use crate::graph::Route;

pub mod bounded;
pub mod dijkstra;

pub use bounded::{bounded_search, shortest_distances, SearchOutcome, SearchStrategy};
pub use dijkstra::dijkstra_table;

/// Best known distance to one airport and the legs that achieve it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableEntry {
    pub distance: f64,
    pub hops: Vec<Route>,
}

impl TableEntry {
    fn unreached() -> Self {
        Self {
            distance: f64::INFINITY,
            hops: Vec::new(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Per-query map from airport to its best distance and hop sequence.
///
/// Every catalog airport has an entry; unreachable ones keep an infinite
/// distance and no hops. The source has distance zero and no hops.
#[derive(Debug, Clone)]
pub struct ShortestDistanceTable {
    source: AirportId,
    entries: HashMap<AirportId, TableEntry>,
}

impl ShortestDistanceTable {
    pub(crate) fn unreached(source: AirportId, catalog: &AirportCatalog) -> Self {
        let mut entries: HashMap<AirportId, TableEntry> = catalog
            .airports()
            .iter()
            .map(|airport| (airport.id, TableEntry::unreached()))
            .collect();
        entries.insert(
            source,
            TableEntry {
                distance: 0.0,
                hops: Vec::new(),
            },
        );
        Self { source, entries }
    }

    pub(crate) fn record(&mut self, airport: AirportId, distance: f64, hops: Vec<Route>) {
        self.entries.insert(airport, TableEntry { distance, hops });
    }

    pub fn source(&self) -> AirportId {
        self.source
    }

    pub fn get(&self, airport: AirportId) -> Option<&TableEntry> {
        self.entries.get(&airport)
    }

    /// Recorded distance, infinite when the airport was never reached.
    pub fn distance(&self, airport: AirportId) -> f64 {
        self.entries
            .get(&airport)
            .map_or(f64::INFINITY, |entry| entry.distance)
    }

    /// Recorded legs, empty for the source and for unreached airports.
    pub fn hops(&self, airport: AirportId) -> &[Route] {
        self.entries
            .get(&airport)
            .map(|entry| entry.hops.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_reachable(&self, airport: AirportId) -> bool {
        self.distance(airport).is_finite()
    }

    /// Airports with a finite distance, including the source.
    pub fn reachable(&self) -> impl Iterator<Item = (AirportId, &TableEntry)> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_reachable())
            .map(|(&id, entry)| (id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
