//! Output formatting for route rendering.
//!
//! Route summaries can be printed as colored text, Markdown-flavoured rich
//! text, a bare path listing, or JSON.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use metroroute_lib::{
    render_comparison, AvailableRoute, Location, NotFound, RouteComparison, RouteRenderMode,
    RouteSummary,
};

use crate::terminal::ColorPalette;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Step listing with per-leg costs and road categories.
    #[default]
    Text,
    /// Markdown-style summary.
    Rich,
    /// Path only, one location per line.
    Basic,
    /// Machine-readable JSON.
    Json,
}

/// JSON shape of a single route request.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteReport {
    Found(RouteSummary),
    NotFound(NotFound),
}

/// JSON shape of an alternative-route request.
#[derive(Debug, Serialize)]
pub struct AlternativeReport {
    pub primary: RouteReport,
    pub alternative: RouteReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<RouteComparison>,
}

/// Print a route report in the requested format.
pub fn render_report(report: &RouteReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(report),
        _ => match report {
            RouteReport::Found(summary) => render_summary(summary, format),
            RouteReport::NotFound(not_found) => {
                render_not_found(not_found);
                Ok(())
            }
        },
    }
}

/// Print a summary in the requested format.
pub fn render_summary(summary: &RouteSummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => render_text(summary),
        OutputFormat::Rich => print!("{}", summary.render(RouteRenderMode::RichText)),
        OutputFormat::Basic => render_basic(summary),
        OutputFormat::Json => return render_json(summary),
    }
    Ok(())
}

/// Human-friendly route view with colored road category tags.
pub fn render_text(summary: &RouteSummary) {
    let palette = ColorPalette::detect();
    println!(
        "{} from {} to {} ({} hops; algorithm: {}; optimized for {}):",
        summary.kind.label(),
        summary.start.name,
        summary.goal.name,
        summary.hops,
        summary.algorithm,
        summary.optimized_for
    );
    for step in &summary.steps {
        match &step.leg {
            Some(leg) => println!(
                " - {}{}{} {}[{}]{} ({:.2} km, {:.2} min)",
                palette.white_bold,
                step.name,
                palette.reset,
                palette.category(leg.category),
                leg.category,
                palette.reset,
                leg.distance,
                leg.time
            ),
            None => println!(" - {}{}{}", palette.white_bold, step.name, palette.reset),
        }
    }
    println!("\nTotal distance: {:.2} km", summary.distance);
    println!("Total time: {:.2} min", summary.time);
    println!(
        "{}Searched {} nodes, {} edge relaxations in {:.3} ms{}",
        palette.gray,
        summary.nodes_visited,
        summary.edge_relaxations,
        summary.execution_time_ms,
        palette.reset
    );
    if summary.used_highway_despite_avoidance {
        println!(
            "{}Note: no highway-free route exists; this route uses a highway.{}",
            palette.orange, palette.reset
        );
    }
}

/// Path listing using `+`/`|`/`-` prefixes for first/middle/last steps.
pub fn render_basic(summary: &RouteSummary) {
    let len = summary.steps.len();
    for (i, step) in summary.steps.iter().enumerate() {
        let prefix = if i == 0 {
            '+'
        } else if i + 1 == len {
            '-'
        } else {
            '|'
        };
        println!("{} {}", prefix, step.name);
    }
    println!("{:.2} km / {:.2} min", summary.distance, summary.time);
}

pub fn render_not_found(not_found: &NotFound) {
    println!("No route found (algorithm: {}).", not_found.algorithm);
    println!("Try relaxing --avoid-tolls, or pick two different locations.");
}

/// Print the comparison block shown after an alternative route.
pub fn render_comparison_text(comparison: &RouteComparison) {
    print!("{}", render_comparison(comparison));
}

/// Render any serialisable value as pretty JSON on stdout.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Print the location listing.
pub fn render_locations(locations: &[&Location], format: OutputFormat) -> io::Result<()> {
    if format == OutputFormat::Json {
        return render_json(locations);
    }
    for location in locations {
        println!(
            "{:<24} {:<20} ({:.5}, {:.5})",
            location.name, location.id, location.position.lat, location.position.lng
        );
    }
    Ok(())
}

/// Print every ordered source/destination pair.
pub fn render_available_routes(routes: &[AvailableRoute], format: OutputFormat) -> io::Result<()> {
    if format == OutputFormat::Json {
        return render_json(routes);
    }
    for route in routes {
        println!("{}", route.display);
    }
    Ok(())
}
