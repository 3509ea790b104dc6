//! Search strategies behind the [`RoutePlanner`] trait.
//!
//! Each algorithm is wrapped in its own planner so the engine's fallback and
//! result-building logic stays independent of the search being run.

use crate::error::Result;
use crate::matrix::CostDimension;
use crate::network::RoadNetwork;
use crate::path::{find_route_a_star, find_route_dijkstra, EdgeFilter, PathSearch};

use super::RouteAlgorithm;

/// Trait for route search strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Run one search attempt under a fixed edge filter.
    ///
    /// Returns `Ok(None)` when no admissible path exists.
    fn find_path(
        &self,
        network: &RoadNetwork,
        start: &str,
        goal: &str,
        dimension: CostDimension,
        filter: &EdgeFilter,
    ) -> Result<Option<PathSearch>>;
}

/// Uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        network: &RoadNetwork,
        start: &str,
        goal: &str,
        dimension: CostDimension,
        filter: &EdgeFilter,
    ) -> Result<Option<PathSearch>> {
        find_route_dijkstra(network, start, goal, dimension, filter)
    }
}

/// Heuristic-guided search using straight-line distance to the goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        network: &RoadNetwork,
        start: &str,
        goal: &str,
        dimension: CostDimension,
        filter: &EdgeFilter,
    ) -> Result<Option<PathSearch>> {
        find_route_a_star(network, start, goal, dimension, filter)
    }
}

/// Select the planner for an algorithm.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dijkstra_planner_returns_correct_algorithm() {
        assert_eq!(DijkstraPlanner.algorithm(), RouteAlgorithm::Dijkstra);
    }

    #[test]
    fn astar_planner_returns_correct_algorithm() {
        assert_eq!(AStarPlanner.algorithm(), RouteAlgorithm::AStar);
    }

    #[test]
    fn select_planner_chooses_correct_type() {
        for algorithm in [RouteAlgorithm::Dijkstra, RouteAlgorithm::AStar] {
            assert_eq!(select_planner(algorithm).algorithm(), algorithm);
        }
    }
}
