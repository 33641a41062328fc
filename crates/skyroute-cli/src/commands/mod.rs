// Each module handles one CLI subcommand; main.rs only parses and dispatches.

pub mod airport;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use skyroute_lib::{load_network_with_options, resolve_dataset, GraphBuildOptions, Network};

/// Locate the dataset and build the route network.
pub fn load_network_for(data_dir: Option<&Path>, options: GraphBuildOptions) -> Result<Network> {
    let paths = resolve_dataset(data_dir).context(
        "failed to locate the OpenFlights dataset (pass --data-dir or set SKYROUTE_DATA_DIR)",
    )?;
    load_network_with_options(&paths, options).with_context(|| {
        format!(
            "failed to load dataset from {}",
            paths
                .airports
                .parent()
                .unwrap_or(&paths.airports)
                .display()
        )
    })
}
