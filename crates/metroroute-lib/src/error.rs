use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the metroroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Failing to find a path is not an error: searches report that through
/// [`crate::RouteOutcome::NotFound`]. The variants here cover malformed input
/// and broken datasets.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a location identifier or name is not in the location table.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when the cost matrix lacks an entry for an ordered location pair.
    #[error("cost matrix has no entry for {from} -> {to}")]
    IncompleteMatrix { from: String, to: String },

    /// Raised when a cost matrix entry is negative or not finite.
    #[error("cost matrix entry {from} -> {to} is invalid: {value}")]
    InvalidCost { from: String, to: String, value: f64 },

    /// Raised when a road rule or hub table names a location that does not exist.
    #[error("road rule references unknown location {location}")]
    InvalidRoadRule { location: String },

    /// Raised when the same location identifier appears twice.
    #[error("duplicate location identifier: {id}")]
    DuplicateLocation { id: String },

    /// Raised when a dataset contains no locations at all.
    #[error("network dataset contains no locations")]
    EmptyNetwork,

    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset location")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing and serialisation errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
