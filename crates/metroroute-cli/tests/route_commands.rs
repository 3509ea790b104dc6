use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../metroroute-lib/data/kingston.json")
        .canonicalize()
        .expect("dataset present")
}

fn prepare_command() -> Command {
    let mut cmd = cargo_bin_cmd!("metroroute");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("METROROUTE_DATASET")
        .arg("--dataset")
        .arg(dataset_path());
    cmd
}

#[test]
fn dijkstra_route_lists_steps_and_totals() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "halfway_tree", "--to", "papine"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Route from Halfway Tree to Papine"))
        .stdout(predicate::str::contains("algorithm: dijkstra"))
        .stdout(predicate::str::contains("Total distance:"))
        .stdout(predicate::str::contains(" km"))
        .stdout(predicate::str::contains("Total time:"));
}

#[test]
fn a_star_algorithm_is_supported() {
    let mut cmd = prepare_command();
    cmd.args([
        "route",
        "--from",
        "Port Royal",
        "--to",
        "Mona",
        "--algorithm",
        "a-star",
        "--optimize",
        "time",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("algorithm: a-star"))
        .stdout(predicate::str::contains("optimized for time"));
}

#[test]
fn highway_fallback_is_reported() {
    let mut cmd = prepare_command();
    cmd.args([
        "route",
        "--from",
        "halfway_tree",
        "--to",
        "old_harbour",
        "--avoid-highways",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[highway]"))
        .stdout(predicate::str::contains(
            "no highway-free route exists; this route uses a highway",
        ));
}

#[test]
fn identical_endpoints_report_no_route() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "mona", "--to", "mona"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No route found"));
}

#[test]
fn unknown_location_suggests_names() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "kingston", "--to", "papine"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown location: kingston"))
        .stderr(predicate::str::contains("New Kingston"));
}

#[test]
fn json_route_includes_status_and_metadata() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "json", "fastest", "--from", "liguanea", "--to", "port_royal"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["status"], "found");
    assert_eq!(value["algorithm"], "a-star");
    assert_eq!(value["optimized_for"], "time");
    assert_eq!(value["start"]["id"], "liguanea");
    assert_eq!(value["goal"]["id"], "port_royal");
    assert!(value["steps"].as_array().expect("steps").len() >= 2);
}

#[test]
fn json_not_found_has_zero_counters() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "json", "route", "--from", "papine", "--to", "papine"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["status"], "not_found");
    assert_eq!(value["nodes_visited"], 0);
    assert_eq!(value["edge_relaxations"], 0);
}

#[test]
fn alternative_command_compares_routes() {
    let mut cmd = prepare_command();
    cmd.args([
        "--format",
        "json",
        "alternative",
        "--from",
        "halfway_tree",
        "--to",
        "spanish_town",
        "--preference",
        "shortest",
    ]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["primary"]["status"], "found");
    assert_eq!(value["alternative"]["status"], "found");
    assert!(value["comparison"]["overlap"].is_number());

    let steps = value["alternative"]["steps"].as_array().expect("steps");
    assert!(steps.iter().any(|step| step["id"] == "cross_roads"));
}

#[test]
fn route_with_alternative_flag_prints_both() {
    let mut cmd = prepare_command();
    cmd.args([
        "route",
        "--from",
        "new_kingston",
        "--to",
        "spanish_town",
        "--alternative",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Route from New Kingston"))
        .stdout(predicate::str::contains("Alternative route from New Kingston"))
        .stdout(predicate::str::contains("Difference:"));
}

#[test]
fn basic_format_outputs_minimal_path() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "basic", "route", "--from", "mona", "--to", "papine"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("+ Mona"))
        .stdout(predicate::str::contains("- Papine"));
}

#[test]
fn missing_dataset_is_reported() {
    let temp = tempdir().expect("temp dir");
    let mut cmd = cargo_bin_cmd!("metroroute");
    cmd.env("RUST_LOG", "error")
        .arg("--dataset")
        .arg(temp.path().join("absent.json"))
        .arg("locations");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("dataset not found"));
}

#[test]
fn dataset_environment_variable_is_honoured() {
    let mut cmd = cargo_bin_cmd!("metroroute");
    cmd.env("RUST_LOG", "error")
        .env("METROROUTE_DATASET", dataset_path())
        .arg("locations");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("University Hospital"));
}
