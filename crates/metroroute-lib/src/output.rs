use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::location::LocationId;
use crate::matrix::CostDimension;
use crate::network::RoadNetwork;
use crate::roads::RoadCategory;
use crate::routing::{AlgorithmInfo, Route, RouteAlgorithm};
use crate::summary::{RoadMix, RouteComparison};

/// Classifies the request that produced a route summary.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteOutputKind {
    Route,
    Fastest,
    Alternative,
}

impl RouteOutputKind {
    /// Human-readable label shown in textual renderings.
    pub fn label(self) -> &'static str {
        match self {
            RouteOutputKind::Route => "Route",
            RouteOutputKind::Fastest => "Fastest route",
            RouteOutputKind::Alternative => "Alternative route",
        }
    }
}

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Endpoint within a route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: LocationId,
    pub name: String,
}

/// Location visited by a route, with the leg that reaches it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: LocationId,
    pub name: String,
    /// Absent for the first step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg: Option<RouteLeg>,
}

/// Single edge between consecutive steps.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RouteLeg {
    pub distance: f64,
    pub time: f64,
    pub category: RoadCategory,
}

/// Structured view of a route that callers can serialise or render.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub kind: RouteOutputKind,
    pub algorithm: RouteAlgorithm,
    pub algorithm_info: AlgorithmInfo,
    pub optimized_for: CostDimension,
    pub hops: usize,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
    pub distance: f64,
    pub time: f64,
    pub nodes_visited: usize,
    pub edge_relaxations: usize,
    pub execution_time_ms: f64,
    pub highways_used: bool,
    pub used_highway_despite_avoidance: bool,
    pub road_mix: RoadMix,
}

impl RouteSummary {
    /// Convert a [`Route`] into a summary with per-leg costs and categories.
    pub fn from_route(kind: RouteOutputKind, network: &RoadNetwork, route: &Route) -> Result<Self> {
        let mut steps = Vec::with_capacity(route.path.len());
        for (index, id) in route.path.iter().enumerate() {
            let leg = match index.checked_sub(1).map(|prev| &route.path[prev]) {
                Some(prev) => {
                    let cost = network.matrix().cost(prev, id)?;
                    Some(RouteLeg {
                        distance: cost.distance,
                        time: cost.time,
                        category: network.classifier().classify(prev, id),
                    })
                }
                None => None,
            };
            steps.push(RouteStep {
                index,
                id: id.clone(),
                name: display_name(network, id),
                leg,
            });
        }

        let endpoint = |step: Option<&RouteStep>| {
            step.map(|step| RouteEndpoint {
                id: step.id.clone(),
                name: step.name.clone(),
            })
            .unwrap_or_else(|| RouteEndpoint {
                id: String::new(),
                name: "<unknown>".to_string(),
            })
        };
        let start = endpoint(steps.first());
        let goal = endpoint(steps.last());

        Ok(Self {
            kind,
            algorithm: route.algorithm,
            algorithm_info: route.algorithm_info,
            optimized_for: route.optimized_for,
            hops: route.hop_count(),
            start,
            goal,
            steps,
            distance: route.distance,
            time: route.time,
            nodes_visited: route.nodes_visited,
            edge_relaxations: route.edge_relaxations,
            execution_time_ms: route.execution_time_ms,
            highways_used: route.highways_used,
            used_highway_despite_avoidance: route.used_highway_despite_avoidance,
            road_mix: RoadMix::for_path(network.classifier(), &route.path),
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{}: {} -> {} ({} hops, algorithm: {}, optimized for {})",
            self.kind.label(),
            self.start.name,
            self.goal.name,
            self.hops,
            self.algorithm,
            self.optimized_for
        );
        for step in &self.steps {
            match &step.leg {
                Some(leg) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} ({}) +{:.2} km, +{:.2} min via {}",
                        step.index, step.name, step.id, leg.distance, leg.time, leg.category
                    );
                }
                None => {
                    let _ = writeln!(buffer, "{:>3}: {} ({})", step.index, step.name, step.id);
                }
            }
        }
        let _ = writeln!(
            buffer,
            "Total: {:.2} km, {:.2} min",
            self.distance, self.time
        );
        let _ = writeln!(
            buffer,
            "Road mix: highway {}%, primary {}%, secondary {}%, tertiary {}%",
            self.road_mix.highway,
            self.road_mix.primary,
            self.road_mix.secondary,
            self.road_mix.tertiary
        );
        let _ = writeln!(
            buffer,
            "Search: {} nodes visited, {} edge relaxations, {:.3} ms",
            self.nodes_visited, self.edge_relaxations, self.execution_time_ms
        );
        if self.used_highway_despite_avoidance {
            let _ = writeln!(
                buffer,
                "Note: no highway-free route exists; this route uses a highway."
            );
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**{}** _{} to {}_ ({} hops, algorithm: `{}`)",
            self.kind.label(),
            self.start.name,
            self.goal.name,
            self.hops,
            self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** (`{}`)",
                step.index, step.name, step.id
            );
        }
        let _ = writeln!(
            buffer,
            "**Total:** {:.2} km, {:.2} min",
            self.distance, self.time
        );
        if self.used_highway_despite_avoidance {
            let _ = writeln!(buffer, "_Highway used: no highway-free route exists._");
        }
        buffer
    }
}

/// Render a comparison between a primary and an alternative route.
pub fn render_comparison(comparison: &RouteComparison) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "Difference: {:+.2} km ({:+.1}%), {:+.2} min ({:+.1}%)",
        comparison.distance_difference,
        comparison.distance_difference_percent,
        comparison.time_difference,
        comparison.time_difference_percent
    );
    let _ = writeln!(
        buffer,
        "Shared locations: {:.0}%",
        comparison.overlap * 100.0
    );
    buffer
}

fn display_name(network: &RoadNetwork, id: &str) -> String {
    network
        .locations()
        .name(id)
        .map(str::to_string)
        .unwrap_or_else(|| "<unknown>".to_string())
}
