//! Road classification for location pairs.
//!
//! Categories come from curated pair lists held in the dataset rather than
//! from code, so the classifier is fully data-driven. Lookups are symmetric:
//! a pair listed as `(a, b)` also classifies `(b, a)`.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::location::{LocationId, LocationTable};

/// Category of the road connecting two locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadCategory {
    Highway,
    Primary,
    Secondary,
    Tertiary,
}

impl RoadCategory {
    /// All categories in reporting order.
    pub const ALL: [RoadCategory; 4] = [
        RoadCategory::Highway,
        RoadCategory::Primary,
        RoadCategory::Secondary,
        RoadCategory::Tertiary,
    ];

    /// Average travel speed assumed for this category, in km/h.
    pub fn speed_kmh(self) -> f64 {
        match self {
            RoadCategory::Highway => 100.0,
            RoadCategory::Primary => 70.0,
            RoadCategory::Secondary => 50.0,
            RoadCategory::Tertiary => 40.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoadCategory::Highway => "highway",
            RoadCategory::Primary => "primary",
            RoadCategory::Secondary => "secondary",
            RoadCategory::Tertiary => "tertiary",
        }
    }
}

impl fmt::Display for RoadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Curated road lists as stored in the dataset.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RoadRules {
    #[serde(default)]
    pub highways: Vec<(LocationId, LocationId)>,
    #[serde(default)]
    pub primary: Vec<(LocationId, LocationId)>,
    #[serde(default)]
    pub secondary: Vec<(LocationId, LocationId)>,
    /// Toll-bearing pairs. Orthogonal to the category.
    #[serde(default)]
    pub tolls: Vec<(LocationId, LocationId)>,
    /// Pairs drawn entirely from this set classify as tertiary.
    #[serde(default)]
    pub tertiary_areas: Vec<LocationId>,
}

/// Unordered location pair.
type PairKey = (LocationId, LocationId);

fn pair_key(a: &str, b: &str) -> PairKey {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Pure, symmetric and total classifier over location pairs.
#[derive(Debug, Clone, Default)]
pub struct RoadClassifier {
    highways: HashSet<PairKey>,
    primary: HashSet<PairKey>,
    secondary: HashSet<PairKey>,
    tolls: HashSet<PairKey>,
    tertiary_areas: BTreeSet<LocationId>,
}

impl RoadClassifier {
    /// Build a classifier from rules without checking location references.
    pub fn new(rules: &RoadRules) -> Self {
        let collect = |pairs: &[(LocationId, LocationId)]| {
            pairs
                .iter()
                .map(|(a, b)| pair_key(a, b))
                .collect::<HashSet<_>>()
        };
        Self {
            highways: collect(&rules.highways),
            primary: collect(&rules.primary),
            secondary: collect(&rules.secondary),
            tolls: collect(&rules.tolls),
            tertiary_areas: rules.tertiary_areas.iter().cloned().collect(),
        }
    }

    /// Build a classifier, rejecting rules that mention unknown locations.
    pub fn validated(rules: &RoadRules, locations: &LocationTable) -> Result<Self> {
        let pair_lists = [
            &rules.highways,
            &rules.primary,
            &rules.secondary,
            &rules.tolls,
        ];
        let referenced = pair_lists
            .iter()
            .flat_map(|pairs| pairs.iter().flat_map(|(a, b)| [a, b]))
            .chain(rules.tertiary_areas.iter());
        for id in referenced {
            if !locations.contains(id) {
                return Err(Error::InvalidRoadRule {
                    location: id.clone(),
                });
            }
        }
        Ok(Self::new(rules))
    }

    /// Classify the road between `a` and `b`.
    ///
    /// Highway and primary lists win over the tertiary area rule. Pairs
    /// matching nothing fall back to primary, never secondary; secondary is
    /// only produced for pairs listed explicitly.
    pub fn classify(&self, a: &str, b: &str) -> RoadCategory {
        let key = pair_key(a, b);
        if self.highways.contains(&key) {
            return RoadCategory::Highway;
        }
        if self.primary.contains(&key) {
            return RoadCategory::Primary;
        }
        if self.secondary.contains(&key) {
            return RoadCategory::Secondary;
        }
        if self.tertiary_areas.contains(a) && self.tertiary_areas.contains(b) {
            return RoadCategory::Tertiary;
        }
        RoadCategory::Primary
    }

    /// Whether the road between `a` and `b` carries a toll.
    pub fn is_tolled(&self, a: &str, b: &str) -> bool {
        self.tolls.contains(&pair_key(a, b))
    }
}
