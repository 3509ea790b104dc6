use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::location::{LocationId, LocationTable};
use crate::roads::RoadClassifier;

/// Which matrix weights the edges during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostDimension {
    /// Kilometres.
    #[default]
    Distance,
    /// Minutes.
    Time,
}

impl CostDimension {
    /// The other dimension.
    pub fn opposite(self) -> Self {
        match self {
            CostDimension::Distance => CostDimension::Time,
            CostDimension::Time => CostDimension::Distance,
        }
    }
}

impl fmt::Display for CostDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            CostDimension::Distance => "distance",
            CostDimension::Time => "time",
        };
        f.write_str(value)
    }
}

/// Distance and travel time for one directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeCost {
    pub distance: f64,
    pub time: f64,
}

impl EdgeCost {
    pub fn get(&self, dimension: CostDimension) -> f64 {
        match dimension {
            CostDimension::Distance => self.distance,
            CostDimension::Time => self.time,
        }
    }
}

/// Nested `{distances: {a: {b: km}}, times: {a: {b: minutes}}}` tables.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MatrixTables {
    pub distances: BTreeMap<LocationId, BTreeMap<LocationId, f64>>,
    pub times: BTreeMap<LocationId, BTreeMap<LocationId, f64>>,
}

/// Precomputed all-pairs distance and time lookup.
///
/// Read-only once built. Completeness against a [`LocationTable`] is checked
/// with [`CostMatrix::validate`] before any search runs.
#[derive(Debug, Clone, Default)]
pub struct CostMatrix {
    entries: HashMap<LocationId, HashMap<LocationId, EdgeCost>>,
}

impl CostMatrix {
    /// Generate the matrix from coordinates and road speeds.
    ///
    /// Distance is the great-circle distance in kilometres; time is that
    /// distance driven at the speed of the pair's road category, in minutes.
    pub fn generate(locations: &LocationTable, classifier: &RoadClassifier) -> Self {
        let mut entries: HashMap<LocationId, HashMap<LocationId, EdgeCost>> = HashMap::new();
        for from in locations.iter() {
            let row = entries.entry(from.id.clone()).or_default();
            for to in locations.iter() {
                if from.id == to.id {
                    continue;
                }
                let distance = from.position.distance_km(&to.position);
                let speed = classifier.classify(&from.id, &to.id).speed_kmh();
                row.insert(
                    to.id.clone(),
                    EdgeCost {
                        distance,
                        time: distance / speed * 60.0,
                    },
                );
            }
        }
        info!(locations = locations.len(), "generated cost matrix");
        Self { entries }
    }

    /// Build a matrix from nested tables. Pairs present in only one of the
    /// two tables are reported as missing.
    pub fn from_tables(tables: MatrixTables) -> Result<Self> {
        let mut entries: HashMap<LocationId, HashMap<LocationId, EdgeCost>> = HashMap::new();
        for (from, row) in &tables.distances {
            for (to, &distance) in row {
                let time = tables
                    .times
                    .get(from)
                    .and_then(|times| times.get(to))
                    .copied()
                    .ok_or_else(|| Error::IncompleteMatrix {
                        from: from.clone(),
                        to: to.clone(),
                    })?;
                entries
                    .entry(from.clone())
                    .or_default()
                    .insert(to.clone(), EdgeCost { distance, time });
            }
        }
        for (from, row) in &tables.times {
            for to in row.keys() {
                let present = entries.get(from).is_some_and(|r| r.contains_key(to));
                if !present {
                    return Err(Error::IncompleteMatrix {
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    /// Check that every ordered pair of distinct locations has a valid entry.
    pub fn validate(&self, locations: &LocationTable) -> Result<()> {
        for from in locations.ids() {
            for to in locations.ids() {
                if from == to {
                    continue;
                }
                let cost = self.cost(from, to)?;
                for value in [cost.distance, cost.time] {
                    if !value.is_finite() || value < 0.0 {
                        return Err(Error::InvalidCost {
                            from: from.clone(),
                            to: to.clone(),
                            value,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Cost of the directed edge `from` -> `to`.
    pub fn cost(&self, from: &str, to: &str) -> Result<EdgeCost> {
        self.entries
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .ok_or_else(|| Error::IncompleteMatrix {
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    /// Cost of the directed edge in one dimension, if present.
    pub fn weight(&self, from: &str, to: &str, dimension: CostDimension) -> Option<f64> {
        self.entries
            .get(from)
            .and_then(|row| row.get(to))
            .map(|cost| cost.get(dimension))
    }

    /// Sum distance and time along consecutive pairs of `path`.
    pub fn path_totals(&self, path: &[LocationId]) -> Result<EdgeCost> {
        let mut totals = EdgeCost {
            distance: 0.0,
            time: 0.0,
        };
        for pair in path.windows(2) {
            let cost = self.cost(&pair[0], &pair[1])?;
            totals.distance += cost.distance;
            totals.time += cost.time;
        }
        Ok(totals)
    }

    /// Export to the nested table shape.
    pub fn to_tables(&self) -> MatrixTables {
        let mut tables = MatrixTables::default();
        for (from, row) in &self.entries {
            for (to, cost) in row {
                tables
                    .distances
                    .entry(from.clone())
                    .or_default()
                    .insert(to.clone(), cost.distance);
                tables
                    .times
                    .entry(from.clone())
                    .or_default()
                    .insert(to.clone(), cost.time);
            }
        }
        tables
    }
}
