use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// Identifier for a location, e.g. `halfway_tree`.
pub type LocationId = String;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Score given to names that contain the query verbatim.
const CONTAINED_SCORE: f64 = 0.9;

/// Named point of interest, the unit node of the route graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub position: GeoPoint,
}

/// On-disk shape of a location entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationRecord {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
}

/// Entry of the location listing returned by [`LocationTable::available_routes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableRoute {
    pub source: LocationId,
    pub source_name: String,
    pub destination: LocationId,
    pub destination_name: String,
    pub display: String,
}

/// Immutable set of locations keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    locations: BTreeMap<LocationId, Location>,
}

impl LocationTable {
    /// Build a table from `(id, record)` pairs, rejecting duplicate ids.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (LocationId, LocationRecord)>,
    {
        let mut locations = BTreeMap::new();
        for (id, record) in records {
            let location = Location {
                id: id.clone(),
                name: record.display_name,
                position: GeoPoint::new(record.lat, record.lng),
            };
            if locations.insert(id.clone(), location).is_some() {
                return Err(Error::DuplicateLocation { id });
            }
        }
        if locations.is_empty() {
            return Err(Error::EmptyNetwork);
        }
        Ok(Self { locations })
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.locations.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Lookup a location or fail with [`Error::UnknownLocation`].
    pub fn require(&self, id: &str) -> Result<&Location> {
        self.locations
            .get(id)
            .ok_or_else(|| Error::UnknownLocation {
                name: id.to_string(),
                suggestions: self.fuzzy_matches(id, 3),
            })
    }

    /// Display name for an identifier, if known.
    pub fn name(&self, id: &str) -> Option<&str> {
        self.locations.get(id).map(|loc| loc.name.as_str())
    }

    /// Iterate locations in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// Iterate identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = &LocationId> {
        self.locations.keys()
    }

    /// Resolve user input to a location identifier.
    ///
    /// Accepts an exact identifier, a case-insensitive display name, or a
    /// case-insensitive display-name prefix that matches exactly one location.
    pub fn resolve(&self, query: &str) -> Result<LocationId> {
        let trimmed = query.trim();
        if self.locations.contains_key(trimmed) {
            return Ok(trimmed.to_string());
        }

        let lowered = trimmed.to_lowercase();
        if let Some(loc) = self
            .locations
            .values()
            .find(|loc| loc.name.to_lowercase() == lowered)
        {
            return Ok(loc.id.clone());
        }

        if !lowered.is_empty() {
            let prefixed: Vec<&Location> = self
                .locations
                .values()
                .filter(|loc| loc.name.to_lowercase().starts_with(&lowered))
                .collect();
            if let [only] = prefixed.as_slice() {
                debug!(query, id = %only.id, "resolved location by name prefix");
                return Ok(only.id.clone());
            }
        }

        Err(Error::UnknownLocation {
            name: trimmed.to_string(),
            suggestions: self.fuzzy_matches(trimmed, 3),
        })
    }

    /// Display names similar to `query`, best first, at most `limit` entries.
    pub fn fuzzy_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let lowered = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .locations
            .values()
            .map(|loc| {
                let by_name = strsim::jaro_winkler(&lowered, &loc.name.to_lowercase());
                let by_id = strsim::jaro_winkler(&lowered, &loc.id);
                let contained = if !lowered.is_empty() && loc.name.to_lowercase().contains(&lowered)
                {
                    CONTAINED_SCORE
                } else {
                    0.0
                };
                (by_name.max(by_id).max(contained), loc.name.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Locations sorted by display name.
    pub fn sorted_by_name(&self) -> Vec<&Location> {
        let mut all: Vec<&Location> = self.locations.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Every ordered pair of distinct locations, sorted by their label.
    pub fn available_routes(&self) -> Vec<AvailableRoute> {
        let sorted = self.sorted_by_name();
        let mut routes = Vec::with_capacity(sorted.len() * sorted.len().saturating_sub(1));
        for source in &sorted {
            for destination in &sorted {
                if source.id == destination.id {
                    continue;
                }
                routes.push(AvailableRoute {
                    source: source.id.clone(),
                    source_name: source.name.clone(),
                    destination: destination.id.clone(),
                    destination_name: destination.name.clone(),
                    display: format!("{} to {}", source.name, destination.name),
                });
            }
        }
        routes.sort_by(|a, b| a.display.cmp(&b.display));
        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lat: f64, lng: f64, name: &str) -> LocationRecord {
        LocationRecord {
            lat,
            lng,
            display_name: name.to_string(),
        }
    }

    fn table() -> LocationTable {
        LocationTable::from_records([
            ("new_kingston".to_string(), record(18.0, -76.78, "New Kingston")),
            ("halfway_tree".to_string(), record(18.01, -76.79, "Halfway Tree")),
            ("mona".to_string(), record(18.008, -76.75, "Mona")),
            ("mona_heights".to_string(), record(18.014, -76.75, "Mona Heights")),
        ])
        .expect("valid table")
    }

    #[test]
    fn resolves_exact_id() {
        assert_eq!(table().resolve("halfway_tree").unwrap(), "halfway_tree");
    }

    #[test]
    fn resolves_display_name_case_insensitively() {
        assert_eq!(table().resolve("halfway tree").unwrap(), "halfway_tree");
        assert_eq!(table().resolve("MONA").unwrap(), "mona");
    }

    #[test]
    fn resolves_unique_prefix() {
        assert_eq!(table().resolve("Half").unwrap(), "halfway_tree");
    }

    #[test]
    fn ambiguous_prefix_is_rejected() {
        // "Mon" prefixes both Mona and Mona Heights.
        let err = table().resolve("Mon").expect_err("ambiguous");
        assert!(matches!(err, Error::UnknownLocation { .. }));
    }

    #[test]
    fn bare_kingston_does_not_resolve() {
        let err = table().resolve("kingston").expect_err("not a prefix");
        match err {
            Error::UnknownLocation { suggestions, .. } => {
                assert!(suggestions.contains(&"New Kingston".to_string()));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = LocationTable::from_records([
            ("a".to_string(), record(0.0, 0.0, "A")),
            ("a".to_string(), record(1.0, 1.0, "A again")),
        ])
        .expect_err("duplicate");
        assert!(matches!(err, Error::DuplicateLocation { id } if id == "a"));
    }

    #[test]
    fn empty_table_is_rejected() {
        let err = LocationTable::from_records(Vec::new()).expect_err("empty");
        assert!(matches!(err, Error::EmptyNetwork));
    }

    #[test]
    fn available_routes_cover_all_ordered_pairs() {
        let routes = table().available_routes();
        assert_eq!(routes.len(), 12);
        assert_eq!(routes[0].display, "Halfway Tree to Mona");
        assert!(routes.iter().all(|r| r.source != r.destination));
    }
}
