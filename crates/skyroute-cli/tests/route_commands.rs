use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/openflights")
        .canonicalize()
        .expect("fixture dataset present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("skyroute-cli");
    cmd.env_remove("SKYROUTE_DATA_DIR")
        .env("RUST_LOG", "error")
        .arg("--data-dir")
        .arg(fixture_dir());
    cmd
}

#[test]
fn route_without_ground_hops() {
    cli()
        .args(["route", "--from", "TLL", "--to", "SFO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Route: TLL -> SFO (4 legs"))
        .stdout(predicate::str::contains("strategy: oracle-pruned"))
        .stdout(predicate::str::contains("YEG"));
}

#[test]
fn route_with_ground_hops_marks_ground_stop() {
    cli()
        .args(["route", "--from", "TLL", "--to", "SFO", "--ground-hops"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Route: TLL -> SFO (2 legs"))
        .stdout(predicate::str::contains("OAK"))
        .stdout(predicate::str::contains("(ground,"));
}

#[test]
fn route_json_lists_stops() {
    let output = cli()
        .args(["--format", "json", "route", "--from", "HAV", "--to", "TAY"])
        .args(["--max-hops", "3", "--strategy", "exhaustive"])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let summary: Value = serde_json::from_slice(&output.stdout).expect("json output");
    let codes: Vec<&str> = summary["stops"]
        .as_array()
        .expect("stops")
        .iter()
        .map(|stop| stop["code"].as_str().expect("code"))
        .collect();
    assert_eq!(codes, ["HAV", "AMS", "HEL", "TAY"]);
    assert_eq!(summary["strategy"], "exhaustive");
    assert_eq!(summary["hop_ceiling"], 3);
}

#[test]
fn route_accepts_icao_codes_in_any_case() {
    cli()
        .args(["route", "--from", "eetn", "--to", "efhk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Route: TLL -> HEL (1 legs"));
}

#[test]
fn not_connected_error_suggests_next_steps() {
    cli()
        .args(["route", "--from", "HAV", "--to", "TAY", "--max-hops", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "HAV and TAY are not connected in 2 allowed hops.",
        ))
        .stderr(predicate::str::contains("--ground-hops"));
}

#[test]
fn unknown_airport_error_is_friendly() {
    cli()
        .args(["route", "--from", "TLX", "--to", "SFO"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown airport 'TLX'."))
        .stderr(predicate::str::contains("Did you mean"));
}

#[test]
fn unknown_strategy_is_rejected_by_the_parser() {
    cli()
        .args(["route", "--from", "TLL", "--to", "SFO", "--strategy", "greedy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown search strategy: greedy"));
}

#[test]
fn missing_dataset_reports_location_hint() {
    let temp = tempfile::tempdir().expect("temp dir");
    cargo_bin_cmd!("skyroute-cli")
        .env_remove("SKYROUTE_DATA_DIR")
        .env("RUST_LOG", "error")
        .arg("--data-dir")
        .arg(temp.path())
        .args(["airport", "TLL"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--data-dir"))
        .stderr(predicate::str::contains("airports.dat"));
}
