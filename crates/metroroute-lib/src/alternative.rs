//! Alternative route generation.
//!
//! Two strategies run in order:
//!
//! 1. **Hub routes**: when either endpoint is a configured hub, route through
//!    the hub's curated waypoints for the other endpoint and stitch the first
//!    pair of sub-searches that both succeed.
//! 2. **General case**: search with the opposite preference and flipped
//!    highway avoidance. If that still shares too many locations with the
//!    original route, detour through the best-ranked nearby location.
//!
//! The generator never invents a route. When every strategy fails it returns
//! the underlying [`NotFound`](crate::NotFound) outcome.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::location::{LocationId, LocationTable};
use crate::matrix::CostDimension;
use crate::routing::{
    path_overlap, NotFound, Route, RouteConstraints, RouteEngine, RouteOutcome, RoutePreference,
};

/// Overlap above which a candidate counts as too similar to the original.
pub const OVERLAP_THRESHOLD: f64 = 0.6;
/// Waypoints closer than this to either endpoint are skipped.
pub const MIN_ENDPOINT_DISTANCE_KM: f64 = 1.0;
/// Maximum straight-line detour relative to the direct distance.
pub const MAX_DETOUR_FACTOR: f64 = 1.4;
/// Waypoints must sit within this distance of the source-destination line.
pub const MAX_PERPENDICULAR_KM: f64 = 10.0;

const PERPENDICULAR_WEIGHT: f64 = 0.5;
const DETOUR_WEIGHT: f64 = 5.0;

/// Curated waypoints for routes that start or end at a hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubRoute {
    pub hub: LocationId,
    /// Used when the other endpoint has no entry in `waypoints`.
    #[serde(default)]
    pub default: Vec<LocationId>,
    /// Other endpoint to ordered waypoint candidates.
    #[serde(default)]
    pub waypoints: BTreeMap<LocationId, Vec<LocationId>>,
}

impl HubRoute {
    /// Ordered waypoints to try when the far end of the route is `other_end`.
    pub fn candidates(&self, other_end: &str) -> &[LocationId] {
        self.waypoints
            .get(other_end)
            .map(Vec::as_slice)
            .unwrap_or(&self.default)
    }
}

/// Hub entries in priority order. The first hub matching either endpoint wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HubTable {
    routes: Vec<HubRoute>,
}

impl HubTable {
    pub fn new(routes: Vec<HubRoute>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[HubRoute] {
        &self.routes
    }

    /// Ensure every hub and waypoint refers to a known location.
    pub fn validate(&self, locations: &LocationTable) -> Result<()> {
        for route in &self.routes {
            let referenced = std::iter::once(&route.hub)
                .chain(route.default.iter())
                .chain(route.waypoints.keys())
                .chain(route.waypoints.values().flatten());
            for id in referenced {
                if !locations.contains(id) {
                    return Err(Error::InvalidRoadRule {
                        location: id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The hub entry for a route between `source` and `destination`, along
    /// with the endpoint that is not the hub.
    pub fn lookup<'a>(
        &'a self,
        source: &'a str,
        destination: &'a str,
    ) -> Option<(&'a HubRoute, &'a str)> {
        self.routes.iter().find_map(|route| {
            if route.hub == source {
                Some((route, destination))
            } else if route.hub == destination {
                Some((route, source))
            } else {
                None
            }
        })
    }
}

/// A location that could carry a detour between two endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointCandidate {
    pub id: LocationId,
    pub perpendicular_km: f64,
    pub detour_factor: f64,
}

impl WaypointCandidate {
    /// Lower is better.
    pub fn score(&self) -> f64 {
        PERPENDICULAR_WEIGHT * self.perpendicular_km + DETOUR_WEIGHT * self.detour_factor
    }
}

/// Rank detour waypoints for a route between `source` and `destination`.
///
/// Excludes the endpoints, anything on `original_path`, locations within
/// [`MIN_ENDPOINT_DISTANCE_KM`] of either endpoint, detours longer than
/// [`MAX_DETOUR_FACTOR`] times the direct distance, and locations
/// [`MAX_PERPENDICULAR_KM`] or further from the direct line. Ordered by
/// ascending score, then id.
pub fn rank_waypoints(
    locations: &LocationTable,
    source: &str,
    destination: &str,
    original_path: &[LocationId],
) -> Result<Vec<WaypointCandidate>> {
    let from = locations.require(source)?.position;
    let to = locations.require(destination)?.position;
    let direct = from.distance_km(&to);
    if direct <= 0.0 {
        return Ok(Vec::new());
    }

    let on_path: HashSet<&str> = original_path.iter().map(String::as_str).collect();
    let mut candidates: Vec<WaypointCandidate> = locations
        .iter()
        .filter(|loc| loc.id != source && loc.id != destination)
        .filter(|loc| !on_path.contains(loc.id.as_str()))
        .filter_map(|loc| evaluate(&loc.id, &loc.position, &from, &to, direct))
        .collect();

    candidates.sort_by(|a, b| {
        a.score()
            .partial_cmp(&b.score())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(candidates)
}

fn evaluate(
    id: &str,
    position: &GeoPoint,
    from: &GeoPoint,
    to: &GeoPoint,
    direct: f64,
) -> Option<WaypointCandidate> {
    let from_source = from.distance_km(position);
    let to_destination = position.distance_km(to);
    if from_source < MIN_ENDPOINT_DISTANCE_KM || to_destination < MIN_ENDPOINT_DISTANCE_KM {
        return None;
    }

    let detour_factor = (from_source + to_destination) / direct;
    if detour_factor > MAX_DETOUR_FACTOR {
        return None;
    }

    let perpendicular_km = position.distance_to_segment_km(from, to);
    if perpendicular_km >= MAX_PERPENDICULAR_KM {
        return None;
    }

    Some(WaypointCandidate {
        id: id.to_string(),
        perpendicular_km,
        detour_factor,
    })
}

/// Join two consecutive routes at their shared junction.
///
/// The junction appears once. Totals and effort counters are summed, and the
/// first segment's algorithm label is kept.
pub fn stitch(first: Route, second: Route) -> Route {
    let mut path = first.path;
    path.pop();
    path.extend(second.path);

    let mut path_names = first.path_names;
    path_names.pop();
    path_names.extend(second.path_names);

    Route {
        path,
        path_names,
        distance: first.distance + second.distance,
        time: first.time + second.time,
        algorithm: first.algorithm,
        algorithm_info: first.algorithm_info,
        optimized_for: first.optimized_for,
        execution_time_ms: first.execution_time_ms + second.execution_time_ms,
        nodes_visited: first.nodes_visited + second.nodes_visited,
        edge_relaxations: first.edge_relaxations + second.edge_relaxations,
        highways_used: first.highways_used || second.highways_used,
        used_highway_despite_avoidance: first.used_highway_despite_avoidance
            || second.used_highway_despite_avoidance,
    }
}

/// Produces a second route that differs meaningfully from the preferred one.
#[derive(Debug, Clone, Copy)]
pub struct AlternativeRouteGenerator<'a> {
    engine: RouteEngine<'a>,
}

impl<'a> AlternativeRouteGenerator<'a> {
    pub fn new(engine: RouteEngine<'a>) -> Self {
        Self { engine }
    }

    pub fn alternative(
        &self,
        source: &str,
        destination: &str,
        preference: RoutePreference,
        constraints: &RouteConstraints,
    ) -> Result<RouteOutcome> {
        let locations = self.engine.network().locations();
        locations.require(source)?;
        locations.require(destination)?;

        if source == destination {
            debug!(source, "alternative requested for identical endpoints");
            return Ok(RouteOutcome::NotFound(NotFound::new(preference.algorithm())));
        }

        if let Some((hub, other_end)) = self.engine.network().hubs().lookup(source, destination) {
            return self.via_hub(hub, other_end, source, destination, preference, constraints);
        }

        self.general(source, destination, preference, constraints)
    }

    fn via_hub(
        &self,
        hub: &HubRoute,
        other_end: &str,
        source: &str,
        destination: &str,
        preference: RoutePreference,
        constraints: &RouteConstraints,
    ) -> Result<RouteOutcome> {
        debug!(hub = %hub.hub, other_end, "using hub waypoints");

        for waypoint in hub.candidates(other_end) {
            if waypoint == source || waypoint == destination {
                continue;
            }
            let first = self.engine.find_shortest_route(
                source,
                waypoint,
                CostDimension::Distance,
                constraints,
            )?;
            let second = self.engine.find_shortest_route(
                waypoint,
                destination,
                CostDimension::Distance,
                constraints,
            )?;
            if let (RouteOutcome::Found(first), RouteOutcome::Found(second)) = (first, second) {
                debug!(%waypoint, "stitched hub alternative");
                return Ok(RouteOutcome::Found(stitch(first, second)));
            }
            debug!(%waypoint, "hub waypoint rejected");
        }

        warn!(
            hub = %hub.hub,
            other_end,
            "no hub waypoint produced a route; using opposite preference"
        );
        self.engine
            .route_for_preference(preference.opposite(), source, destination, constraints)
    }

    fn general(
        &self,
        source: &str,
        destination: &str,
        preference: RoutePreference,
        constraints: &RouteConstraints,
    ) -> Result<RouteOutcome> {
        let original =
            self.engine
                .route_for_preference(preference, source, destination, constraints)?;

        let alt_preference = preference.opposite();
        let alt_constraints = RouteConstraints {
            avoid_highways: !constraints.avoid_highways,
            ..*constraints
        };
        let candidate = self.engine.route_for_preference(
            alt_preference,
            source,
            destination,
            &alt_constraints,
        )?;

        let Some(original) = original.into_route() else {
            return Ok(candidate);
        };

        let candidate_overlap = candidate
            .route()
            .map(|route| path_overlap(&original.path, &route.path));
        if let Some(overlap) = candidate_overlap {
            if overlap <= OVERLAP_THRESHOLD {
                return Ok(candidate);
            }
            debug!(overlap, "alternative too similar; looking for a detour");
        }

        let locations = self.engine.network().locations();
        for waypoint in rank_waypoints(locations, source, destination, &original.path)? {
            let Some(stitched) = self.through(
                source,
                &waypoint.id,
                destination,
                alt_preference,
                &alt_constraints,
            )?
            else {
                debug!(waypoint = %waypoint.id, "detour waypoint rejected");
                continue;
            };

            let overlap = path_overlap(&original.path, &stitched.path);
            if candidate_overlap.map_or(true, |current| overlap < current) {
                debug!(waypoint = %waypoint.id, overlap, "using detour waypoint");
                return Ok(RouteOutcome::Found(stitched));
            }
        }

        Ok(candidate)
    }

    fn through(
        &self,
        source: &str,
        waypoint: &str,
        destination: &str,
        preference: RoutePreference,
        constraints: &RouteConstraints,
    ) -> Result<Option<Route>> {
        let first = self
            .engine
            .route_for_preference(preference, source, waypoint, constraints)?;
        let Some(first) = first.into_route() else {
            return Ok(None);
        };
        let second = self
            .engine
            .route_for_preference(preference, waypoint, destination, constraints)?;
        Ok(second.into_route().map(|second| stitch(first, second)))
    }
}
