//! Route command handler for the cheapest route between two airports.

use std::path::Path;

use anyhow::{Context, Result};

use skyroute_lib::{
    plan_route, Error as RouteError, GraphBuildOptions, RouteRequest, RouteSummary,
    SearchStrategy, DEFAULT_HOP_CEILING,
};

use crate::commands::load_network_for;
use crate::output::OutputFormat;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Departure airport code (IATA or ICAO).
    pub from: String,
    /// Arrival airport code (IATA or ICAO).
    pub to: String,
    /// Maximum number of legs.
    pub max_hops: usize,
    /// Allow a leg to end with a ground transfer.
    pub ground_hops: bool,
    pub strategy: SearchStrategy,
}

impl Default for RouteCommandArgs {
    fn default() -> Self {
        Self {
            from: String::new(),
            to: String::new(),
            max_hops: DEFAULT_HOP_CEILING,
            ground_hops: false,
            strategy: SearchStrategy::default(),
        }
    }
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(self.from.trim(), self.to.trim())
            .with_hop_ceiling(self.max_hops)
            .with_ground_hops(self.ground_hops)
            .with_strategy(self.strategy)
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    data_dir: Option<&Path>,
    options: GraphBuildOptions,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let network = load_network_for(data_dir, options)?;
    let request = args.to_request();

    let plan = match plan_route(&network, &request) {
        Ok(plan) => plan,
        Err(err) => return Err(handle_route_failure(&request, err)),
    };

    let summary = RouteSummary::from_plan(network.catalog(), &plan)
        .context("failed to build route summary for display")?;

    format.render_route(&summary)
}

fn handle_route_failure(request: &RouteRequest, err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownAirport { code, suggestions } => {
            anyhow::anyhow!(format_unknown_airport_message(&code, &suggestions))
        }
        RouteError::NotConnected {
            origin,
            destination,
            hop_ceiling,
        } => anyhow::anyhow!(format_not_connected_message(
            &origin,
            &destination,
            hop_ceiling,
            request.ground_hops
        )),
        other => anyhow::Error::new(other),
    }
}

pub(crate) fn format_unknown_airport_message(code: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown airport '{}'.", code);
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

fn format_not_connected_message(
    origin: &str,
    destination: &str,
    hop_ceiling: usize,
    ground_hops: bool,
) -> String {
    let mut message = format!(
        "{} and {} are not connected in {} allowed hops.",
        origin, destination, hop_ceiling
    );
    let mut tips = vec!["raise --max-hops"];
    if !ground_hops {
        tips.push("allow ground transfers with --ground-hops");
    }
    message.push_str(&format!(" Try {}.", tips.join(" or ")));
    message
}
