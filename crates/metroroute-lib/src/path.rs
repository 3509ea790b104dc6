use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::error::{Error, Result};
use crate::location::LocationId;
use crate::matrix::CostDimension;
use crate::network::RoadNetwork;
use crate::roads::RoadCategory;

/// Average speed assumed when turning straight-line distance into minutes.
const HEURISTIC_SPEED_KMH: f64 = 60.0;

/// Edge exclusions applied during a single search attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeFilter {
    /// Skip edges classified as highway.
    pub exclude_highways: bool,
    /// Skip toll-bearing edges.
    pub exclude_tolls: bool,
}

impl EdgeFilter {
    fn allows(&self, network: &RoadNetwork, from: &str, to: &str) -> bool {
        if self.exclude_highways
            && network.classifier().classify(from, to) == RoadCategory::Highway
        {
            return false;
        }

        if self.exclude_tolls && network.classifier().is_tolled(from, to) {
            return false;
        }

        true
    }
}

/// Path found by a single search attempt along with effort counters.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSearch {
    pub path: Vec<LocationId>,
    /// Total cost in the searched dimension, as accumulated by relaxation.
    pub cost: f64,
    pub nodes_visited: usize,
    pub edge_relaxations: usize,
}

/// Run Dijkstra's algorithm over the complete location graph.
///
/// Stops as soon as `goal` is popped from the frontier. Frontier ties are
/// broken by the lexicographically smaller location id.
pub fn find_route_dijkstra(
    network: &RoadNetwork,
    start: &str,
    goal: &str,
    dimension: CostDimension,
    filter: &EdgeFilter,
) -> Result<Option<PathSearch>> {
    search(network, start, goal, dimension, filter, |_| 0.0)
}

/// Run A* search guided by straight-line distance to `goal`.
///
/// For [`CostDimension::Distance`] the heuristic is the great-circle distance
/// and never overestimates. For [`CostDimension::Time`] it assumes 60 km/h;
/// highway legs are faster than that, so the estimate can overshoot and the
/// returned path is not guaranteed to be the cheapest in that dimension.
pub fn find_route_a_star(
    network: &RoadNetwork,
    start: &str,
    goal: &str,
    dimension: CostDimension,
    filter: &EdgeFilter,
) -> Result<Option<PathSearch>> {
    let goal_position = network.locations().require(goal)?.position;
    let locations = network.locations();
    search(network, start, goal, dimension, filter, |node| {
        locations
            .get(node)
            .map(|loc| estimate(loc.position.distance_km(&goal_position), dimension))
            .unwrap_or(0.0)
    })
}

/// Convert a straight-line distance in km into the active cost dimension.
pub fn estimate(straight_line_km: f64, dimension: CostDimension) -> f64 {
    match dimension {
        CostDimension::Distance => straight_line_km,
        CostDimension::Time => straight_line_km / HEURISTIC_SPEED_KMH * 60.0,
    }
}

fn search<H>(
    network: &RoadNetwork,
    start: &str,
    goal: &str,
    dimension: CostDimension,
    filter: &EdgeFilter,
    heuristic: H,
) -> Result<Option<PathSearch>>
where
    H: Fn(&str) -> f64,
{
    network.locations().require(start)?;
    network.locations().require(goal)?;

    if start == goal {
        return Ok(Some(PathSearch {
            path: vec![start.to_string()],
            cost: 0.0,
            nodes_visited: 0,
            edge_relaxations: 0,
        }));
    }

    // A node missing from `best` has not been reached yet.
    let mut best: HashMap<LocationId, f64> = HashMap::new();
    let mut parents: HashMap<LocationId, LocationId> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut nodes_visited = 0usize;
    let mut edge_relaxations = 0usize;

    best.insert(start.to_string(), 0.0);
    queue.push(QueueEntry::new(start.to_string(), 0.0, heuristic(start)));

    while let Some(entry) = queue.pop() {
        let current_cost = match best.get(&entry.node) {
            Some(cost) if *cost < entry.cost.0 => continue,
            Some(cost) => *cost,
            None => continue,
        };
        nodes_visited += 1;

        if entry.node == goal {
            let path = reconstruct_path(&parents, start, goal);
            return Ok(Some(PathSearch {
                path,
                cost: current_cost,
                nodes_visited,
                edge_relaxations,
            }));
        }

        for next in network.locations().ids() {
            if *next == entry.node || !filter.allows(network, &entry.node, next) {
                continue;
            }

            let weight = network
                .matrix()
                .weight(&entry.node, next, dimension)
                .ok_or_else(|| Error::IncompleteMatrix {
                    from: entry.node.clone(),
                    to: next.clone(),
                })?;
            edge_relaxations += 1;

            let next_cost = current_cost + weight;
            let improves = best.get(next).map_or(true, |known| next_cost < *known);
            if improves {
                best.insert(next.clone(), next_cost);
                parents.insert(next.clone(), entry.node.clone());
                queue.push(QueueEntry::new(
                    next.clone(),
                    next_cost,
                    heuristic(next.as_str()),
                ));
            }
        }
    }

    Ok(None)
}

fn reconstruct_path(
    parents: &HashMap<LocationId, LocationId>,
    start: &str,
    goal: &str,
) -> Vec<LocationId> {
    let mut path = vec![goal.to_string()];
    let mut current = goal;
    while current != start {
        match parents.get(current) {
            Some(parent) => {
                path.push(parent.clone());
                current = parent.as_str();
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: LocationId,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl QueueEntry {
    fn new(node: LocationId, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
