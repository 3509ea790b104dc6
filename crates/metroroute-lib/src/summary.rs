//! Route statistics derived after a search: road mix and route comparison.

use serde::Serialize;

use crate::location::LocationId;
use crate::roads::{RoadCategory, RoadClassifier};
use crate::routing::{path_overlap, Route};

/// Share of a path's legs on each road category, in whole percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoadMix {
    pub highway: u32,
    pub primary: u32,
    pub secondary: u32,
    pub tertiary: u32,
}

impl RoadMix {
    /// Percentages over the legs of `path`, totalling 100.
    ///
    /// Rounding leftovers go to the largest share. A path with no legs
    /// yields all zeros.
    pub fn for_path(classifier: &RoadClassifier, path: &[LocationId]) -> Self {
        let mut counts = [0u32; 4];
        for leg in path.windows(2) {
            let category = classifier.classify(&leg[0], &leg[1]);
            counts[category_index(category)] += 1;
        }

        let legs: u32 = counts.iter().sum();
        if legs == 0 {
            return Self::default();
        }

        let mut shares = counts.map(|count| count * 100 / legs);
        let remainder = 100 - shares.iter().sum::<u32>();
        if remainder > 0 {
            // First category wins ties for the largest count.
            let largest = counts
                .iter()
                .enumerate()
                .rev()
                .max_by_key(|(_, count)| **count)
                .map(|(index, _)| index)
                .unwrap_or(0);
            shares[largest] += remainder;
        }

        Self {
            highway: shares[0],
            primary: shares[1],
            secondary: shares[2],
            tertiary: shares[3],
        }
    }

    pub fn share(&self, category: RoadCategory) -> u32 {
        match category {
            RoadCategory::Highway => self.highway,
            RoadCategory::Primary => self.primary,
            RoadCategory::Secondary => self.secondary,
            RoadCategory::Tertiary => self.tertiary,
        }
    }
}

fn category_index(category: RoadCategory) -> usize {
    match category {
        RoadCategory::Highway => 0,
        RoadCategory::Primary => 1,
        RoadCategory::Secondary => 2,
        RoadCategory::Tertiary => 3,
    }
}

/// How an alternative route differs from the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteComparison {
    /// Alternative minus primary, in km.
    pub distance_difference: f64,
    /// Alternative minus primary, in minutes.
    pub time_difference: f64,
    pub distance_difference_percent: f64,
    pub time_difference_percent: f64,
    /// Fraction of the primary route's locations also on the alternative.
    pub overlap: f64,
}

impl RouteComparison {
    pub fn between(primary: &Route, alternative: &Route) -> Self {
        let distance_difference = alternative.distance - primary.distance;
        let time_difference = alternative.time - primary.time;
        Self {
            distance_difference,
            time_difference,
            distance_difference_percent: percent(distance_difference, primary.distance),
            time_difference_percent: percent(time_difference, primary.time),
            overlap: path_overlap(&primary.path, &alternative.path),
        }
    }
}

fn percent(difference: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        difference / base * 100.0
    }
}
