//! Route planning between two airports under a hop ceiling.
//!
//! This module provides:
//! - [`RouteRequest`] - airport codes plus search options
//! - [`RoutePlan`] - the cheapest route found and how it was found
//! - [`plan_route`] - resolves codes, picks the graph, runs the search
//!
//! # Example
//!
//! ```ignore
//! use skyroute_lib::{load_network, plan_route, resolve_dataset, RouteRequest};
//!
//! let network = load_network(&resolve_dataset(None)?)?;
//! let request = RouteRequest::new("TLL", "SFO").with_ground_hops(true);
//! let plan = plan_route(&network, &request)?;
//! println!("{} legs, {:.0} km", plan.hop_count(), plan.distance);
//! ```

mod planner;

pub use planner::{
    select_planner, ExhaustivePlanner, HopSearch, OraclePrunedPlanner, SelfPrunedPlanner,
};

use serde::Serialize;
use tracing::debug;

use crate::airport::AirportId;
use crate::error::{Error, Result};
use crate::graph::Route;
use crate::network::Network;
use crate::path::SearchStrategy;

/// Hop ceiling used when a request does not name one.
pub const DEFAULT_HOP_CEILING: usize = 4;

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    /// IATA or ICAO code of the departure airport.
    pub source: String,
    /// IATA or ICAO code of the arrival airport.
    pub destination: String,
    pub hop_ceiling: usize,
    /// Search the ground-augmented graph instead of flights only.
    pub ground_hops: bool,
    pub strategy: SearchStrategy,
}

impl RouteRequest {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            hop_ceiling: DEFAULT_HOP_CEILING,
            ground_hops: false,
            strategy: SearchStrategy::default(),
        }
    }

    pub fn with_hop_ceiling(mut self, hop_ceiling: usize) -> Self {
        self.hop_ceiling = hop_ceiling;
        self
    }

    pub fn with_ground_hops(mut self, ground_hops: bool) -> Self {
        self.ground_hops = ground_hops;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub source: AirportId,
    pub destination: AirportId,
    /// Total great-circle kilometres, ground segments included.
    pub distance: f64,
    pub legs: Vec<Route>,
    pub hop_ceiling: usize,
    pub strategy: SearchStrategy,
    pub ground_hops: bool,
    /// Partial paths the search took off its stack.
    pub explored: usize,
}

impl RoutePlan {
    /// Number of legs. A ground continuation counts as part of its flight.
    pub fn hop_count(&self) -> usize {
        self.legs.len()
    }

    /// Airports a traveller passes through, including ground-transfer airports.
    pub fn itinerary(&self) -> Vec<AirportId> {
        let mut stops = Vec::with_capacity(self.legs.len() * 2 + 1);
        stops.push(self.source);
        for leg in &self.legs {
            stops.extend(leg.ground_hop_from);
            stops.push(leg.destination);
        }
        stops
    }
}

/// Plan the cheapest route within the request's hop ceiling.
///
/// Fails with [`Error::UnknownAirport`] when a code does not resolve and with
/// [`Error::NotConnected`] when no route fits within the ceiling.
pub fn plan_route(network: &Network, request: &RouteRequest) -> Result<RoutePlan> {
    let catalog = network.catalog();
    let source = catalog.resolve(&request.source)?.id;
    let destination = catalog.resolve(&request.destination)?.id;

    let graph = network.graph(request.ground_hops);
    let planner = select_planner(request.strategy);
    let outcome = planner.search(graph, catalog, source, request.hop_ceiling);

    let entry = outcome
        .table
        .get(destination)
        .filter(|entry| entry.is_reachable())
        .ok_or_else(|| Error::NotConnected {
            origin: request.source.clone(),
            destination: request.destination.clone(),
            hop_ceiling: request.hop_ceiling,
        })?;

    debug!(
        source = %request.source,
        destination = %request.destination,
        legs = entry.hops.len(),
        distance_km = entry.distance,
        explored = outcome.explored,
        "planned route"
    );

    Ok(RoutePlan {
        source,
        destination,
        distance: entry.distance,
        legs: entry.hops.clone(),
        hop_ceiling: request.hop_ceiling,
        strategy: planner.algorithm(),
        ground_hops: request.ground_hops,
        explored: outcome.explored,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults() {
        let request = RouteRequest::new("TLL", "SFO");
        assert_eq!(request.hop_ceiling, DEFAULT_HOP_CEILING);
        assert!(!request.ground_hops);
        assert_eq!(request.strategy, SearchStrategy::OraclePruned);

        let request = request
            .with_hop_ceiling(2)
            .with_ground_hops(true)
            .with_strategy(SearchStrategy::Exhaustive);
        assert_eq!(request.hop_ceiling, 2);
        assert!(request.ground_hops);
        assert_eq!(request.strategy, SearchStrategy::Exhaustive);
    }

    #[test]
    fn itinerary_expands_ground_transfers() {
        let plan = RoutePlan {
            source: 1,
            destination: 4,
            distance: 30.0,
            legs: vec![
                Route::flight(1, 2, 10.0),
                Route {
                    source: 2,
                    destination: 4,
                    distance: 20.0,
                    ground_hop_from: Some(3),
                },
            ],
            hop_ceiling: 4,
            strategy: SearchStrategy::OraclePruned,
            ground_hops: true,
            explored: 0,
        };
        assert_eq!(plan.hop_count(), 2);
        assert_eq!(plan.itinerary(), vec![1, 2, 3, 4]);
    }
}
