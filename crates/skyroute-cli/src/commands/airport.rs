//! Airport and ground-connection lookups.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use skyroute_lib::{Airport, Error as LibError, GraphBuildOptions, Network};

use crate::commands::load_network_for;
use crate::commands::route::format_unknown_airport_message;
use crate::output::OutputFormat;

/// One ground connection as shown to the user.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroundConnectionView {
    pub code: String,
    pub name: String,
    /// Great-circle distance in kilometres.
    pub distance: f64,
}

/// Airport details with its connectivity.
#[derive(Debug, Clone, Serialize)]
pub struct AirportDetails {
    #[serde(flatten)]
    pub airport: Airport,
    pub code: String,
    /// Direct flights departing this airport.
    pub departures: usize,
    pub ground_connections: Vec<GroundConnectionView>,
}

impl AirportDetails {
    pub fn from_network(network: &Network, airport: &Airport) -> Self {
        Self {
            airport: airport.clone(),
            code: airport.display_code(),
            departures: network.flights().neighbours(airport.id).len(),
            ground_connections: ground_connections(network, airport),
        }
    }
}

fn ground_connections(network: &Network, airport: &Airport) -> Vec<GroundConnectionView> {
    let catalog = network.catalog();
    network
        .ground_connections()
        .neighbours(airport.id)
        .iter()
        .map(|link| GroundConnectionView {
            code: catalog.display_code(link.airport),
            name: catalog
                .get(link.airport)
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            distance: link.distance,
        })
        .collect()
}

fn resolve<'a>(network: &'a Network, code: &str) -> Result<&'a Airport> {
    network
        .catalog()
        .resolve(code.trim())
        .map_err(|err| match err {
            LibError::UnknownAirport { code, suggestions } => {
                anyhow::anyhow!(format_unknown_airport_message(&code, &suggestions))
            }
            other => anyhow::Error::new(other),
        })
}

/// Handle the airport subcommand.
pub fn handle_airport_command(
    data_dir: Option<&Path>,
    options: GraphBuildOptions,
    format: OutputFormat,
    code: &str,
) -> Result<()> {
    let network = load_network_for(data_dir, options)?;
    let airport = resolve(&network, code)?;
    format.render_airport(&AirportDetails::from_network(&network, airport))
}

/// Handle the ground subcommand.
pub fn handle_ground_command(
    data_dir: Option<&Path>,
    options: GraphBuildOptions,
    format: OutputFormat,
    code: &str,
) -> Result<()> {
    let network = load_network_for(data_dir, options)?;
    let airport = resolve(&network, code)?;
    let connections = ground_connections(&network, airport);
    format.render_ground(
        &airport.display_code(),
        network.ground_connections().max_km(),
        &connections,
    )
}
