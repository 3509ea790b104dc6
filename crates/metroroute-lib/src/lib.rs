//! Metroroute library entry points.
//!
//! This crate loads a metropolitan location network (locations, road rules,
//! hub waypoint tables and a distance/time cost matrix), runs shortest-path
//! searches over it, and builds alternative routes. Higher-level consumers
//! such as the CLI should only depend on the items exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod alternative;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod location;
pub mod matrix;
pub mod network;
pub mod output;
pub mod path;
pub mod roads;
pub mod routing;
pub mod summary;

pub use alternative::{
    rank_waypoints, stitch, AlternativeRouteGenerator, HubRoute, HubTable, WaypointCandidate,
};
pub use dataset::{
    default_dataset_path, load_network, resolve_dataset, DatasetSource, DATASET_ENV_VAR,
};
pub use error::{Error, Result};
pub use geo::GeoPoint;
pub use location::{AvailableRoute, Location, LocationId, LocationRecord, LocationTable};
pub use matrix::{CostDimension, CostMatrix, EdgeCost, MatrixTables};
pub use network::{NetworkDocument, RoadNetwork};
pub use output::{
    render_comparison, RouteEndpoint, RouteLeg, RouteOutputKind, RouteRenderMode, RouteStep,
    RouteSummary,
};
pub use path::{find_route_a_star, find_route_dijkstra, EdgeFilter, PathSearch};
pub use roads::{RoadCategory, RoadClassifier, RoadRules};
pub use routing::{
    path_overlap, select_planner, AlgorithmInfo, NotFound, Route, RouteAlgorithm,
    RouteConstraints, RouteEngine, RouteOutcome, RoutePlanner, RoutePreference,
};
pub use summary::{RoadMix, RouteComparison};
