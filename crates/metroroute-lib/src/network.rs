//! The read-only road network shared by every search.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::alternative::{HubRoute, HubTable};
use crate::error::{Error, Result};
use crate::location::{LocationId, LocationRecord, LocationTable};
use crate::matrix::{CostMatrix, MatrixTables};
use crate::roads::{RoadClassifier, RoadRules};

/// Built-in Kingston metropolitan dataset.
const BUILTIN_DATASET: &str = include_str!("../data/kingston.json");

/// On-disk shape of a network dataset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkDocument {
    pub locations: BTreeMap<LocationId, LocationRecord>,
    #[serde(default)]
    pub roads: RoadRules,
    #[serde(default)]
    pub hubs: Vec<HubRoute>,
    /// Precomputed matrix; generated from coordinates when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<MatrixTables>,
}

/// Locations, road rules, hub waypoint tables and the cost matrix.
///
/// Constructed once, validated as a whole, then shared by reference with the
/// [`crate::RouteEngine`]. Nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    locations: LocationTable,
    classifier: RoadClassifier,
    matrix: CostMatrix,
    hubs: HubTable,
}

impl RoadNetwork {
    /// Assemble and validate a network from its parts.
    pub fn new(
        locations: LocationTable,
        classifier: RoadClassifier,
        matrix: CostMatrix,
        hubs: HubTable,
    ) -> Result<Self> {
        if locations.is_empty() {
            return Err(Error::EmptyNetwork);
        }
        matrix.validate(&locations)?;
        hubs.validate(&locations)?;
        Ok(Self {
            locations,
            classifier,
            matrix,
            hubs,
        })
    }

    /// Build a network from a parsed dataset document.
    pub fn from_document(document: NetworkDocument) -> Result<Self> {
        let locations = LocationTable::from_records(document.locations)?;
        let classifier = RoadClassifier::validated(&document.roads, &locations)?;
        let matrix = match document.matrix {
            Some(tables) => CostMatrix::from_tables(tables)?,
            None => CostMatrix::generate(&locations, &classifier),
        };
        let hubs = HubTable::new(document.hubs);
        Self::new(locations, classifier, matrix, hubs)
    }

    /// Parse a dataset from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: NetworkDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Load a dataset file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }
        let json = fs::read_to_string(path)?;
        let network = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            locations = network.locations.len(),
            "loaded network dataset"
        );
        Ok(network)
    }

    /// The embedded Kingston metropolitan network.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_DATASET)
    }

    /// Replace the cost matrix with one read from a nested-table JSON file.
    pub fn with_matrix_file(self, path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }
        let tables: MatrixTables = serde_json::from_str(&fs::read_to_string(path)?)?;
        let matrix = CostMatrix::from_tables(tables)?;
        Self::new(self.locations, self.classifier, matrix, self.hubs)
    }

    pub fn locations(&self) -> &LocationTable {
        &self.locations
    }

    pub fn classifier(&self) -> &RoadClassifier {
        &self.classifier
    }

    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    pub fn hubs(&self) -> &HubTable {
        &self.hubs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roads::RoadCategory;

    #[test]
    fn builtin_dataset_loads() {
        let network = RoadNetwork::builtin().expect("builtin dataset is valid");
        assert_eq!(network.locations().len(), 15);
        assert_eq!(
            network.classifier().classify("spanish_town", "halfway_tree"),
            RoadCategory::Highway
        );
        assert_eq!(network.hubs().routes().len(), 2);
    }

    #[test]
    fn unknown_road_reference_is_rejected() {
        let json = r#"{
            "locations": {"a": {"lat": 0.0, "lng": 0.0, "display_name": "A"}},
            "roads": {"highways": [["a", "z"]]}
        }"#;
        let err = RoadNetwork::from_json(json).expect_err("z is unknown");
        assert!(matches!(err, Error::InvalidRoadRule { location } if location == "z"));
    }

    #[test]
    fn unknown_hub_waypoint_is_rejected() {
        let json = r#"{
            "locations": {
                "a": {"lat": 0.0, "lng": 0.0, "display_name": "A"},
                "b": {"lat": 0.0, "lng": 0.1, "display_name": "B"}
            },
            "hubs": [{"hub": "a", "default": ["nowhere"]}]
        }"#;
        let err = RoadNetwork::from_json(json).expect_err("nowhere is unknown");
        assert!(matches!(err, Error::InvalidRoadRule { location } if location == "nowhere"));
    }

    #[test]
    fn incomplete_embedded_matrix_fails_at_load() {
        let json = r#"{
            "locations": {
                "a": {"lat": 0.0, "lng": 0.0, "display_name": "A"},
                "b": {"lat": 0.0, "lng": 0.1, "display_name": "B"}
            },
            "matrix": {"distances": {"a": {"b": 1.0}}, "times": {"a": {"b": 1.0}}}
        }"#;
        let err = RoadNetwork::from_json(json).expect_err("b -> a missing");
        assert!(matches!(err, Error::IncompleteMatrix { .. }));
    }

    #[test]
    fn missing_dataset_path_is_reported() {
        let err = RoadNetwork::load(Path::new("/definitely/not/here.json")).expect_err("missing");
        assert!(matches!(err, Error::DatasetNotFound { .. }));
    }
}
