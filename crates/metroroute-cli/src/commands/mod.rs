// Module exports for CLI subcommands
//
// Each module handles a specific group of subcommands. main.rs parses the
// arguments, loads the network once, and dispatches to these handlers.

pub mod inspect;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use metroroute_lib::{resolve_dataset, DatasetSource, RoadNetwork};
use tracing::debug;

/// Load the active network, applying an optional matrix override.
pub fn load(dataset: Option<&Path>, matrix: Option<&Path>) -> Result<RoadNetwork> {
    let source = resolve_dataset(dataset).context("failed to locate the network dataset")?;
    let network = match source {
        DatasetSource::File(path) => RoadNetwork::load(&path)
            .with_context(|| format!("failed to load dataset from {}", path.display()))?,
        DatasetSource::Builtin => {
            debug!("using built-in dataset");
            RoadNetwork::builtin().context("built-in dataset is invalid")?
        }
    };

    match matrix {
        Some(path) => network
            .with_matrix_file(path)
            .with_context(|| format!("failed to load cost matrix from {}", path.display())),
        None => Ok(network),
    }
}
