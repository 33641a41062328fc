use tracing::info;

use crate::airport::AirportCatalog;
use crate::data::{load_airports_from_path, load_routes_from_path, RawRoute};
use crate::dataset::DatasetPaths;
use crate::error::Result;
use crate::graph::{build_graph, Graph};
use crate::ground::{
    augment_with_ground_hops, find_ground_connections, GraphBuildOptions, GroundConnections,
};

/// Everything a route query reads, built once before any query runs.
///
/// Nothing in a `Network` changes after construction, so it can be shared
/// across threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct Network {
    catalog: AirportCatalog,
    flights: Graph,
    augmented: Graph,
    ground: GroundConnections,
}

impl Network {
    /// Build both edge indexes from airports and raw route records.
    pub fn build(
        catalog: AirportCatalog,
        raw_routes: &[RawRoute],
        options: GraphBuildOptions,
    ) -> Self {
        let flights = build_graph(&catalog, raw_routes);
        let ground = find_ground_connections(&catalog, options.ground_hop_max_km);
        let augmented = augment_with_ground_hops(&flights, &ground);

        info!(
            airports = catalog.len(),
            flight_edges = flights.edge_count(),
            augmented_edges = augmented.edge_count(),
            ground_pairs = ground.pair_count(),
            "route network ready"
        );

        Self {
            catalog,
            flights,
            augmented,
            ground,
        }
    }

    pub fn catalog(&self) -> &AirportCatalog {
        &self.catalog
    }

    /// Flight-only edge index.
    pub fn flights(&self) -> &Graph {
        &self.flights
    }

    /// Flight edges plus ground continuations.
    pub fn augmented(&self) -> &Graph {
        &self.augmented
    }

    pub fn ground_connections(&self) -> &GroundConnections {
        &self.ground
    }

    /// The graph a query should search.
    pub fn graph(&self, ground_hops: bool) -> &Graph {
        if ground_hops {
            &self.augmented
        } else {
            &self.flights
        }
    }
}

/// Load the dataset and build the network with default options.
pub fn load_network(paths: &DatasetPaths) -> Result<Network> {
    load_network_with_options(paths, GraphBuildOptions::default())
}

pub fn load_network_with_options(
    paths: &DatasetPaths,
    options: GraphBuildOptions,
) -> Result<Network> {
    paths.ensure_exists()?;
    let airports = load_airports_from_path(&paths.airports)?;
    let routes = load_routes_from_path(&paths.routes)?;
    Ok(Network::build(AirportCatalog::new(airports), &routes, options))
}
