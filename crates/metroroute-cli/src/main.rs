use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use metroroute_cli::commands::{self, inspect, route};
use metroroute_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Metropolitan route search utilities")]
struct Cli {
    /// Network dataset file. Falls back to METROROUTE_DATASET, the data
    /// directory, then the built-in Kingston network.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Replace the dataset's cost matrix with a nested-table JSON file.
    #[arg(long, global = true)]
    matrix: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two locations.
    Route(route::RouteCommandArgs),
    /// Compute the quickest route using A* on travel time.
    Fastest(route::FastestCommandArgs),
    /// Compute a primary route and a meaningfully different alternative.
    Alternative(route::AlternativeCommandArgs),
    /// Show the road category between two locations.
    Classify {
        /// First location id or display name.
        a: String,
        /// Second location id or display name.
        b: String,
    },
    /// List known locations.
    Locations,
    /// List every source/destination pair.
    Routes,
    /// Export the active cost matrix as JSON.
    Matrix {
        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let network = commands::load(cli.dataset.as_deref(), cli.matrix.as_deref())?;
    let format = cli.format;

    match &cli.command {
        Command::Route(args) => route::handle_route_command(&network, format, args),
        Command::Fastest(args) => route::handle_fastest_command(&network, format, args),
        Command::Alternative(args) => route::handle_alternative_command(&network, format, args),
        Command::Classify { a, b } => inspect::handle_classify_command(&network, format, a, b),
        Command::Locations => inspect::handle_locations_command(&network, format),
        Command::Routes => inspect::handle_routes_command(&network, format),
        Command::Matrix { output } => inspect::handle_matrix_command(&network, output.as_deref()),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
