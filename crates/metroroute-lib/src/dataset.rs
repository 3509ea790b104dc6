use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};
use crate::network::RoadNetwork;

/// Environment variable that points at a network dataset file.
pub const DATASET_ENV_VAR: &str = "METROROUTE_DATASET";

/// Default filename for a user-provided dataset in the data directory.
const DATASET_FILENAME: &str = "network.json";

/// Where the active network came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// A file on disk.
    File(PathBuf),
    /// The dataset compiled into the library.
    Builtin,
}

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "metroroute", "metroroute").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Decide which dataset to load.
///
/// Resolution order: the explicit `target`, the [`DATASET_ENV_VAR`]
/// environment variable, `network.json` in the platform data directory, and
/// finally the built-in dataset. Explicit and environment paths must exist.
pub fn resolve_dataset(target: Option<&Path>) -> Result<DatasetSource> {
    if let Some(path) = target {
        return existing(path.to_path_buf());
    }

    if let Some(value) = env::var_os(DATASET_ENV_VAR) {
        if !value.is_empty() {
            debug!(env = DATASET_ENV_VAR, "using dataset path from environment");
            return existing(PathBuf::from(value));
        }
    }

    match default_dataset_path() {
        Ok(path) if path.exists() => {
            debug!(path = %path.display(), "using dataset from data directory");
            Ok(DatasetSource::File(path))
        }
        _ => Ok(DatasetSource::Builtin),
    }
}

fn existing(path: PathBuf) -> Result<DatasetSource> {
    if path.exists() {
        Ok(DatasetSource::File(path))
    } else {
        Err(Error::DatasetNotFound { path })
    }
}

/// Resolve and load the network in one step.
pub fn load_network(target: Option<&Path>) -> Result<RoadNetwork> {
    match resolve_dataset(target)? {
        DatasetSource::File(path) => RoadNetwork::load(&path),
        DatasetSource::Builtin => RoadNetwork::builtin(),
    }
}
