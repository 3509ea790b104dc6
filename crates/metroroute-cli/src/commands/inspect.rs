//! Network inspection handlers: `classify`, `locations`, `routes` and `matrix`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use metroroute_lib::{RoadCategory, RoadNetwork};

use crate::output::{render_available_routes, render_json, render_locations, OutputFormat};

#[derive(Debug, Serialize)]
struct Classification<'a> {
    from: &'a str,
    to: &'a str,
    category: RoadCategory,
    speed_kmh: f64,
    tolled: bool,
}

/// Handle the `classify` subcommand.
pub fn handle_classify_command(
    network: &RoadNetwork,
    format: OutputFormat,
    a: &str,
    b: &str,
) -> Result<()> {
    let from = network.locations().resolve(a)?;
    let to = network.locations().resolve(b)?;
    let category = network.classifier().classify(&from, &to);
    let classification = Classification {
        from: &from,
        to: &to,
        category,
        speed_kmh: category.speed_kmh(),
        tolled: network.classifier().is_tolled(&from, &to),
    };

    if format == OutputFormat::Json {
        render_json(&classification)?;
        return Ok(());
    }

    println!(
        "{} <-> {}: {} ({} km/h{})",
        network.locations().name(&from).unwrap_or(&from),
        network.locations().name(&to).unwrap_or(&to),
        category,
        category.speed_kmh(),
        if classification.tolled { ", toll" } else { "" }
    );
    Ok(())
}

/// Handle the `locations` subcommand.
pub fn handle_locations_command(network: &RoadNetwork, format: OutputFormat) -> Result<()> {
    render_locations(&network.locations().sorted_by_name(), format)?;
    Ok(())
}

/// Handle the `routes` subcommand.
pub fn handle_routes_command(network: &RoadNetwork, format: OutputFormat) -> Result<()> {
    render_available_routes(&network.locations().available_routes(), format)?;
    Ok(())
}

/// Handle the `matrix` subcommand: export the active matrix as JSON.
pub fn handle_matrix_command(network: &RoadNetwork, output: Option<&Path>) -> Result<()> {
    let tables = network.matrix().to_tables();
    match output {
        Some(path) => {
            let json = serde_json::to_string_pretty(&tables)?;
            fs::write(path, json)
                .with_context(|| format!("failed to write matrix to {}", path.display()))?;
            info!(path = %path.display(), "wrote cost matrix");
            println!("Matrix written to {}", path.display());
        }
        None => render_json(&tables)?,
    }
    Ok(())
}
