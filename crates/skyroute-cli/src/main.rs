use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use skyroute_cli::commands::airport::{handle_airport_command, handle_ground_command};
use skyroute_cli::commands::route::{handle_route_command, RouteCommandArgs};
use skyroute_cli::output::OutputFormat;
use skyroute_lib::{
    GraphBuildOptions, SearchStrategy, DEFAULT_HOP_CEILING, GROUND_HOP_MAX_DISTANCE_KM,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "SkyRoute airport lookup and bounded-hop route planning")]
struct Cli {
    /// Directory holding airports.dat and routes.dat (falls back to SKYROUTE_DATA_DIR).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Largest great-circle distance (km) covered by a ground transfer.
    #[arg(long, default_value_t = GROUND_HOP_MAX_DISTANCE_KM, global = true)]
    ground_hop_km: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the cheapest route between two airports within a hop ceiling.
    Route {
        /// Departure airport (IATA or ICAO code).
        #[arg(long = "from")]
        from: String,
        /// Arrival airport (IATA or ICAO code).
        #[arg(long = "to")]
        to: String,
        /// Maximum number of legs.
        #[arg(long, default_value_t = DEFAULT_HOP_CEILING)]
        max_hops: usize,
        /// Allow a leg to finish with a ground transfer to a nearby airport.
        #[arg(long)]
        ground_hops: bool,
        /// Search strategy: exhaustive, self-pruned or oracle-pruned.
        #[arg(long, default_value_t = SearchStrategy::OraclePruned)]
        strategy: SearchStrategy,
    },
    /// Show an airport by IATA or ICAO code.
    Airport {
        code: String,
    },
    /// List airports reachable from an airport by ground.
    Ground {
        code: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let data_dir = cli.data_dir.as_deref();
    let options = GraphBuildOptions {
        ground_hop_max_km: cli.ground_hop_km,
    };

    match cli.command {
        Command::Route {
            from,
            to,
            max_hops,
            ground_hops,
            strategy,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                max_hops,
                ground_hops,
                strategy,
            };
            handle_route_command(data_dir, options, cli.format, &args)
        }
        Command::Airport { code } => handle_airport_command(data_dir, options, cli.format, &code),
        Command::Ground { code } => handle_ground_command(data_dir, options, cli.format, &code),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
