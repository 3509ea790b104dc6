//! Route search module.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search algorithms (Dijkstra, A*)
//! - [`RouteConstraints`] - Per-request avoidance preferences
//! - [`RoutePreference`] - Fastest vs. shortest objective
//! - [`Route`] / [`RouteOutcome`] - Search results
//! - [`RouteEngine`] - Entry point wrapping a shared [`RoadNetwork`]
//!
//! # Strategy Pattern
//!
//! Each algorithm sits behind the [`RoutePlanner`] trait. The engine picks a
//! planner, applies the highway fallback, and turns the raw path into a
//! [`Route`] with totals recomputed from the cost matrix.
//!
//! # Example
//!
//! ```ignore
//! use metroroute_lib::{RoadNetwork, RouteConstraints, RouteEngine, CostDimension};
//!
//! let network = RoadNetwork::builtin()?;
//! let engine = RouteEngine::new(&network);
//! let outcome = engine.find_shortest_route(
//!     "halfway_tree",
//!     "papine",
//!     CostDimension::Distance,
//!     &RouteConstraints::default(),
//! )?;
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::alternative::AlternativeRouteGenerator;
use crate::error::Result;
use crate::location::LocationId;
use crate::matrix::CostDimension;
use crate::network::RoadNetwork;
use crate::path::{EdgeFilter, PathSearch};
use crate::roads::RoadCategory;

/// Supported search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Uniform-cost search.
    #[default]
    Dijkstra,
    /// Heuristic-guided search.
    #[serde(rename = "a-star")]
    AStar,
}

impl RouteAlgorithm {
    /// Static descriptive metadata for this algorithm.
    pub fn info(self) -> AlgorithmInfo {
        match self {
            RouteAlgorithm::Dijkstra => AlgorithmInfo {
                name: "Dijkstra's Algorithm",
                description:
                    "Uniform-cost search over precomputed distances or travel times",
                time_complexity: "O((V+E) log V)",
                space_complexity: "O(V)",
            },
            RouteAlgorithm::AStar => AlgorithmInfo {
                name: "A* Search Algorithm",
                description: "Best-first search guided by straight-line distance to the goal",
                time_complexity: "O(E) with a good heuristic",
                space_complexity: "O(V)",
            },
        }
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

/// Human-readable algorithm metadata attached to every result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

/// Avoidance preferences supplied with a request.
///
/// Only `avoid_highways` and `avoid_tolls` change which edges a search may
/// use. The other two flags are carried through for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConstraints {
    #[serde(default)]
    pub avoid_tolls: bool,
    #[serde(default)]
    pub avoid_highways: bool,
    #[serde(default)]
    pub avoid_hilly_roads: bool,
    #[serde(default)]
    pub avoid_inner_city: bool,
}

impl RouteConstraints {
    fn edge_filter(&self) -> EdgeFilter {
        EdgeFilter {
            exclude_highways: self.avoid_highways,
            exclude_tolls: self.avoid_tolls,
        }
    }
}

/// Optimisation objective of a route request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePreference {
    /// Least travel time, via A* on the time matrix.
    #[default]
    Fastest,
    /// Least distance, via Dijkstra on the distance matrix.
    Shortest,
}

impl RoutePreference {
    pub fn opposite(self) -> Self {
        match self {
            RoutePreference::Fastest => RoutePreference::Shortest,
            RoutePreference::Shortest => RoutePreference::Fastest,
        }
    }

    /// Algorithm used to serve this preference.
    pub fn algorithm(self) -> RouteAlgorithm {
        match self {
            RoutePreference::Fastest => RouteAlgorithm::AStar,
            RoutePreference::Shortest => RouteAlgorithm::Dijkstra,
        }
    }
}

impl fmt::Display for RoutePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RoutePreference::Fastest => "fastest",
            RoutePreference::Shortest => "shortest",
        };
        f.write_str(value)
    }
}

/// A found route. Built fresh per search and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub path: Vec<LocationId>,
    pub path_names: Vec<String>,
    /// Kilometres, summed from the matrix along `path`.
    pub distance: f64,
    /// Minutes, summed from the matrix along `path`.
    pub time: f64,
    pub algorithm: RouteAlgorithm,
    pub algorithm_info: AlgorithmInfo,
    pub optimized_for: CostDimension,
    pub execution_time_ms: f64,
    pub nodes_visited: usize,
    pub edge_relaxations: usize,
    /// At least one leg of `path` is a highway.
    pub highways_used: bool,
    /// Highways were requested to be avoided but no highway-free path existed.
    pub used_highway_despite_avoidance: bool,
}

impl Route {
    /// Number of legs in the route.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Fraction of this route's locations that also appear in `other`.
    pub fn overlap_with(&self, other: &Route) -> f64 {
        path_overlap(&self.path, &other.path)
    }
}

/// Reported when no admissible path exists, even after the highway fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotFound {
    pub algorithm: RouteAlgorithm,
    pub algorithm_info: AlgorithmInfo,
    pub execution_time_ms: f64,
    pub nodes_visited: usize,
    pub edge_relaxations: usize,
}

impl NotFound {
    pub(crate) fn new(algorithm: RouteAlgorithm) -> Self {
        Self {
            algorithm,
            algorithm_info: algorithm.info(),
            execution_time_ms: 0.0,
            nodes_visited: 0,
            edge_relaxations: 0,
        }
    }
}

/// Result of a route request: a route, or a normal "no path" outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found(Route),
    NotFound(NotFound),
}

impl RouteOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::NotFound(_) => None,
        }
    }

    pub fn into_route(self) -> Option<Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::NotFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    pub fn algorithm(&self) -> RouteAlgorithm {
        match self {
            RouteOutcome::Found(route) => route.algorithm,
            RouteOutcome::NotFound(not_found) => not_found.algorithm,
        }
    }
}

/// Fraction of `original`'s distinct locations present in `other`.
///
/// Set ratio, ignores order. An empty `original` overlaps nothing.
pub fn path_overlap(original: &[LocationId], other: &[LocationId]) -> f64 {
    let original: HashSet<&LocationId> = original.iter().collect();
    if original.is_empty() {
        return 0.0;
    }
    let other: HashSet<&LocationId> = other.iter().collect();
    original.intersection(&other).count() as f64 / original.len() as f64
}

/// Entry point for route searches over a shared, read-only network.
///
/// Holds no mutable state; every call is self-contained, so one engine can
/// serve concurrent callers.
#[derive(Debug, Clone, Copy)]
pub struct RouteEngine<'a> {
    network: &'a RoadNetwork,
}

impl<'a> RouteEngine<'a> {
    pub fn new(network: &'a RoadNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &'a RoadNetwork {
        self.network
    }

    /// Uniform-cost search in the chosen dimension.
    pub fn find_shortest_route(
        &self,
        source: &str,
        destination: &str,
        dimension: CostDimension,
        constraints: &RouteConstraints,
    ) -> Result<RouteOutcome> {
        self.search(
            RouteAlgorithm::Dijkstra,
            source,
            destination,
            dimension,
            constraints,
        )
    }

    /// Heuristic-guided search on travel time.
    pub fn find_fastest_route(
        &self,
        source: &str,
        destination: &str,
        constraints: &RouteConstraints,
    ) -> Result<RouteOutcome> {
        self.search(
            RouteAlgorithm::AStar,
            source,
            destination,
            CostDimension::Time,
            constraints,
        )
    }

    /// Route for a preference: fastest runs A* on time, shortest runs
    /// Dijkstra on distance.
    pub fn route_for_preference(
        &self,
        preference: RoutePreference,
        source: &str,
        destination: &str,
        constraints: &RouteConstraints,
    ) -> Result<RouteOutcome> {
        match preference {
            RoutePreference::Fastest => self.find_fastest_route(source, destination, constraints),
            RoutePreference::Shortest => self.find_shortest_route(
                source,
                destination,
                CostDimension::Distance,
                constraints,
            ),
        }
    }

    /// A second, meaningfully different route between the same endpoints.
    pub fn alternative_route(
        &self,
        source: &str,
        destination: &str,
        preference: RoutePreference,
        constraints: &RouteConstraints,
    ) -> Result<RouteOutcome> {
        AlternativeRouteGenerator::new(*self).alternative(
            source,
            destination,
            preference,
            constraints,
        )
    }

    /// Road category between two locations.
    pub fn classify_road(&self, a: &str, b: &str) -> RoadCategory {
        self.network.classifier().classify(a, b)
    }

    /// Run `algorithm` with the highway fallback applied.
    ///
    /// Unknown locations fail before any search starts. If highways are to
    /// be avoided and no highway-free path exists, the search is repeated
    /// with highways allowed and the result is flagged. Tolls stay excluded
    /// on the retry.
    pub fn search(
        &self,
        algorithm: RouteAlgorithm,
        source: &str,
        destination: &str,
        dimension: CostDimension,
        constraints: &RouteConstraints,
    ) -> Result<RouteOutcome> {
        let locations = self.network.locations();
        locations.require(source)?;
        locations.require(destination)?;

        let started = Instant::now();
        let planner = select_planner(algorithm);
        let algorithm = planner.algorithm();
        let filter = constraints.edge_filter();

        let mut used_fallback = false;
        let mut found = self.attempt(planner.as_ref(), source, destination, dimension, &filter)?;

        if found.is_none() && constraints.avoid_highways {
            warn!(
                source,
                destination,
                %algorithm,
                "no highway-free path; retrying with highways allowed"
            );
            let relaxed = EdgeFilter {
                exclude_highways: false,
                ..filter
            };
            found = self.attempt(planner.as_ref(), source, destination, dimension, &relaxed)?;
            used_fallback = found.is_some();
        }

        let Some(search) = found else {
            debug!(source, destination, %algorithm, "no valid path found");
            return Ok(RouteOutcome::NotFound(NotFound::new(algorithm)));
        };

        let route = self.build_route(
            algorithm,
            dimension,
            search,
            started.elapsed().as_secs_f64() * 1000.0,
            used_fallback,
        )?;
        debug!(
            source,
            destination,
            %algorithm,
            nodes_visited = route.nodes_visited,
            edge_relaxations = route.edge_relaxations,
            "route found"
        );
        Ok(RouteOutcome::Found(route))
    }

    /// One search attempt. Paths shorter than two locations are rejected,
    /// which makes `source == destination` a not-found outcome.
    fn attempt(
        &self,
        planner: &dyn RoutePlanner,
        source: &str,
        destination: &str,
        dimension: CostDimension,
        filter: &EdgeFilter,
    ) -> Result<Option<PathSearch>> {
        let found = planner.find_path(self.network, source, destination, dimension, filter)?;
        Ok(found.filter(|search| {
            search.path.len() >= 2
                && search.path.first().map(String::as_str) == Some(source)
                && search.path.last().map(String::as_str) == Some(destination)
        }))
    }

    fn build_route(
        &self,
        algorithm: RouteAlgorithm,
        dimension: CostDimension,
        search: PathSearch,
        execution_time_ms: f64,
        used_fallback: bool,
    ) -> Result<Route> {
        let totals = self.network.matrix().path_totals(&search.path)?;
        let classifier = self.network.classifier();
        let highways_used = search
            .path
            .windows(2)
            .any(|pair| classifier.classify(&pair[0], &pair[1]) == RoadCategory::Highway);
        let path_names = search
            .path
            .iter()
            .map(|id| {
                self.network
                    .locations()
                    .name(id)
                    .unwrap_or(id.as_str())
                    .to_string()
            })
            .collect();

        Ok(Route {
            path: search.path,
            path_names,
            distance: totals.distance,
            time: totals.time,
            algorithm,
            algorithm_info: algorithm.info(),
            optimized_for: dimension,
            execution_time_ms,
            nodes_visited: search.nodes_visited,
            edge_relaxations: search.edge_relaxations,
            highways_used,
            used_highway_despite_avoidance: used_fallback && highways_used,
        })
    }
}
