use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_powerforge"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn write_grids(dir: &TempDir, name: &str, json: &serde_json::Value) -> String {
    let path = dir.path().join(name);
    fs::write(&path, json.to_string()).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_cli_search_json() {
    let output = run(&["search", "--sample", "scattered", "--json"]);
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports[0]["gridName"], "scattered");
    assert_eq!(reports[0]["bestRate"], 13_178_226_716u64);
    assert_eq!(reports[0]["accumulators"].as_array().unwrap().len(), 8);
}

#[test]
fn test_cli_search_table() {
    let output = run(&["search", "--sample", "clustered", "--total-buildings", "12"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("clustered"));
    assert!(stdout.contains("Best grid"));
    assert!(stdout.contains("4,301,968,020"));
}

#[test]
fn test_cli_baseline() {
    let output = run(&["baseline", "--sample", "scattered"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("9,400,377,150"));
}

#[test]
fn test_cli_rates_file_and_override() {
    let dir = tempfile::tempdir().unwrap();
    let rates = write_grids(
        &dir,
        "rates.json",
        &serde_json::json!({ "base_rate": 1, "crystal_rate": 0, "accu_rate": 0, "accu_bonus": 0 }),
    );

    // 38 plants at 1/h each
    let output = run(&["baseline", "--sample", "scattered", "--rates", &rates]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(" 38 |"));

    let output = run(&[
        "baseline", "--sample", "scattered", "--rates", &rates, "--base-rate", "2",
    ]);
    assert!(String::from_utf8_lossy(&output.stdout).contains(" 76 |"));
}

#[test]
fn test_cli_rejects_impossible_budget() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = vec![vec![32u32; 9]; 8];
    rows[0][0] = 0;
    let grids = write_grids(
        &dir,
        "grids.json",
        &serde_json::json!({ "grids": [{ "name": "tiny", "cells": rows }] }),
    );

    let output = run(&["search", "--grids", &grids]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_resources_only_strips_buildings() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = powerforge::layouts::KnownLayout::Scattered.grid().to_codes();
    for row in rows.iter_mut().take(3) {
        for cell in row.iter_mut().filter(|c| **c == 0) {
            *cell = 8;
        }
    }
    let grids = write_grids(
        &dir,
        "built.json",
        &serde_json::json!({ "grids": [{ "name": "built", "cells": rows }] }),
    );

    let output = run(&["search", "--grids", &grids, "--resources-only", "--json"]);
    assert!(output.status.success());
    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports[0]["bestRate"], 13_178_226_716u64);
}
