//! SkyRoute library entry points.
//!
//! This crate loads OpenFlights airport and route data, builds the flight and
//! ground-augmented edge indexes, and answers "cheapest route between two
//! airports using at most K legs". Higher-level consumers (CLI, HTTP service)
//! should only depend on the functions exported here instead of
//! reimplementing behavior.

pub mod airport;
pub mod data;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod graph;
pub mod ground;
pub mod network;
pub mod output;
pub mod path;
pub mod routing;
pub mod spatial;

pub use airport::{Airport, AirportCatalog, AirportId};
pub use data::{load_airports, load_routes, RawRoute};
pub use dataset::{resolve_dataset, DatasetPaths, DATA_DIR_ENV};
pub use error::{Error, Result};
pub use geo::{haversine_km, Location};
pub use graph::{build_graph, EdgeKind, Graph, GraphMode, Route};
pub use ground::{
    augment_with_ground_hops, find_ground_connections, GraphBuildOptions, GroundConnections,
    GroundLink, GROUND_HOP_MAX_DISTANCE_KM,
};
pub use network::{load_network, load_network_with_options, Network};
pub use output::{Arrival, RouteStop, RouteSummary};
pub use path::{
    bounded_search, dijkstra_table, shortest_distances, SearchOutcome, SearchStrategy,
    ShortestDistanceTable, TableEntry,
};
pub use routing::{
    plan_route, select_planner, HopSearch, RoutePlan, RouteRequest, DEFAULT_HOP_CEILING,
};
