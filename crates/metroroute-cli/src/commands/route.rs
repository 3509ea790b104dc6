//! Route command handlers: `route`, `fastest` and `alternative`.

use anyhow::Result;
use clap::{Args, ValueEnum};

use metroroute_lib::{
    CostDimension, RoadNetwork, RouteAlgorithm, RouteComparison, RouteConstraints, RouteEngine,
    RouteOutcome, RouteOutputKind, RoutePreference, RouteSummary,
};

use crate::output::{
    render_comparison_text, render_json, render_report, AlternativeReport, OutputFormat,
    RouteReport,
};

/// Search algorithm choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    #[default]
    Dijkstra,
    #[value(name = "a-star", alias = "astar")]
    AStar,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
        }
    }
}

/// Cost dimension choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OptimizeArg {
    #[default]
    Distance,
    Time,
}

impl From<OptimizeArg> for CostDimension {
    fn from(value: OptimizeArg) -> Self {
        match value {
            OptimizeArg::Distance => CostDimension::Distance,
            OptimizeArg::Time => CostDimension::Time,
        }
    }
}

/// Preference choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PreferenceArg {
    #[default]
    Fastest,
    Shortest,
}

impl From<PreferenceArg> for RoutePreference {
    fn from(value: PreferenceArg) -> Self {
        match value {
            PreferenceArg::Fastest => RoutePreference::Fastest,
            PreferenceArg::Shortest => RoutePreference::Shortest,
        }
    }
}

/// Endpoints shared by all route commands.
#[derive(Args, Debug, Clone)]
pub struct Endpoints {
    /// Starting location id or display name.
    #[arg(long = "from")]
    pub from: String,
    /// Destination location id or display name.
    #[arg(long = "to")]
    pub to: String,
}

/// Avoidance flags shared by all route commands.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct AvoidArgs {
    /// Skip highway roads; falls back to highways when nothing else connects.
    #[arg(long)]
    pub avoid_highways: bool,
    /// Skip toll roads.
    #[arg(long)]
    pub avoid_tolls: bool,
    /// Recorded with the request; does not change the search.
    #[arg(long)]
    pub avoid_hilly_roads: bool,
    /// Recorded with the request; does not change the search.
    #[arg(long)]
    pub avoid_inner_city: bool,
}

impl From<AvoidArgs> for RouteConstraints {
    fn from(args: AvoidArgs) -> Self {
        RouteConstraints {
            avoid_tolls: args.avoid_tolls,
            avoid_highways: args.avoid_highways,
            avoid_hilly_roads: args.avoid_hilly_roads,
            avoid_inner_city: args.avoid_inner_city,
        }
    }
}

/// Arguments for the `route` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RouteCommandArgs {
    #[command(flatten)]
    pub endpoints: Endpoints,
    /// Algorithm to use when planning the route.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Dijkstra)]
    pub algorithm: AlgorithmArg,
    /// Cost dimension to minimise.
    #[arg(long, value_enum, default_value_t = OptimizeArg::Distance)]
    pub optimize: OptimizeArg,
    #[command(flatten)]
    pub avoid: AvoidArgs,
    /// Also compute an alternative route and compare the two.
    #[arg(long)]
    pub alternative: bool,
}

/// Arguments for the `fastest` subcommand.
#[derive(Args, Debug, Clone)]
pub struct FastestCommandArgs {
    #[command(flatten)]
    pub endpoints: Endpoints,
    #[command(flatten)]
    pub avoid: AvoidArgs,
}

/// Arguments for the `alternative` subcommand.
#[derive(Args, Debug, Clone)]
pub struct AlternativeCommandArgs {
    #[command(flatten)]
    pub endpoints: Endpoints,
    /// Preference of the primary route; the alternative leans the other way.
    #[arg(long, value_enum, default_value_t = PreferenceArg::Fastest)]
    pub preference: PreferenceArg,
    #[command(flatten)]
    pub avoid: AvoidArgs,
}

/// Handle the `route` subcommand.
pub fn handle_route_command(
    network: &RoadNetwork,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let (from, to) = resolve(network, &args.endpoints)?;
    let constraints = RouteConstraints::from(args.avoid);
    let engine = RouteEngine::new(network);

    let primary = engine.search(
        args.algorithm.into(),
        &from,
        &to,
        args.optimize.into(),
        &constraints,
    )?;

    if !args.alternative {
        let report = report(network, RouteOutputKind::Route, &primary)?;
        render_report(&report, format)?;
        return Ok(());
    }

    let preference = match args.optimize {
        OptimizeArg::Distance => RoutePreference::Shortest,
        OptimizeArg::Time => RoutePreference::Fastest,
    };
    let alternative = engine.alternative_route(&from, &to, preference, &constraints)?;
    render_pair(network, format, RouteOutputKind::Route, &primary, &alternative)
}

/// Handle the `fastest` subcommand.
pub fn handle_fastest_command(
    network: &RoadNetwork,
    format: OutputFormat,
    args: &FastestCommandArgs,
) -> Result<()> {
    let (from, to) = resolve(network, &args.endpoints)?;
    let engine = RouteEngine::new(network);
    let outcome = engine.find_fastest_route(&from, &to, &args.avoid.into())?;
    let report = report(network, RouteOutputKind::Fastest, &outcome)?;
    render_report(&report, format)?;
    Ok(())
}

/// Handle the `alternative` subcommand.
pub fn handle_alternative_command(
    network: &RoadNetwork,
    format: OutputFormat,
    args: &AlternativeCommandArgs,
) -> Result<()> {
    let (from, to) = resolve(network, &args.endpoints)?;
    let constraints = RouteConstraints::from(args.avoid);
    let preference = RoutePreference::from(args.preference);
    let engine = RouteEngine::new(network);

    let primary = engine.route_for_preference(preference, &from, &to, &constraints)?;
    let alternative = engine.alternative_route(&from, &to, preference, &constraints)?;
    let kind = match preference {
        RoutePreference::Fastest => RouteOutputKind::Fastest,
        RoutePreference::Shortest => RouteOutputKind::Route,
    };
    render_pair(network, format, kind, &primary, &alternative)
}

fn resolve(network: &RoadNetwork, endpoints: &Endpoints) -> Result<(String, String)> {
    let from = network.locations().resolve(&endpoints.from)?;
    let to = network.locations().resolve(&endpoints.to)?;
    Ok((from, to))
}

fn report(network: &RoadNetwork, kind: RouteOutputKind, outcome: &RouteOutcome) -> Result<RouteReport> {
    Ok(match outcome {
        RouteOutcome::Found(route) => {
            RouteReport::Found(RouteSummary::from_route(kind, network, route)?)
        }
        RouteOutcome::NotFound(not_found) => RouteReport::NotFound(not_found.clone()),
    })
}

fn render_pair(
    network: &RoadNetwork,
    format: OutputFormat,
    kind: RouteOutputKind,
    primary: &RouteOutcome,
    alternative: &RouteOutcome,
) -> Result<()> {
    let comparison = match (primary.route(), alternative.route()) {
        (Some(primary), Some(alternative)) => Some(RouteComparison::between(primary, alternative)),
        _ => None,
    };
    let primary = report(network, kind, primary)?;
    let alternative = report(network, RouteOutputKind::Alternative, alternative)?;

    if format == OutputFormat::Json {
        render_json(&AlternativeReport {
            primary,
            alternative,
            comparison,
        })?;
        return Ok(());
    }

    render_report(&primary, format)?;
    println!();
    render_report(&alternative, format)?;
    if let Some(comparison) = comparison {
        println!();
        render_comparison_text(&comparison);
    }
    Ok(())
}
