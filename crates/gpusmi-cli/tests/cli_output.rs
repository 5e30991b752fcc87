//! End-to-end CLI tests: formats, compatibility modes, and destinations.

use assert_cmd::Command;
use predicates::prelude::*;

fn gpusmi() -> Command {
    Command::cargo_bin("gpusmi").expect("binary builds")
}

#[test]
fn test_metric_csv_prints_header_and_rows() {
    gpusmi()
        .args(["--format", "csv", "metric"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("gpu,"))
        .stdout(predicate::str::contains("\n0,"))
        .stdout(predicate::str::contains("\n1,"));
}

#[test]
fn test_static_human_readable_is_default() {
    gpusmi()
        .args(["--gpu", "0", "static"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GPU: 0"))
        .stdout(predicate::str::contains("ASIC:"))
        .stdout(predicate::str::contains("    MARKET_NAME: Instinct MI210"));
}

#[test]
fn test_static_json_single_device_parses() {
    let output = gpusmi()
        .args(["--format", "json", "--gpu", "0", "static"])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["gpu"], 0);
    assert_eq!(value["asic"]["market_name"], "Instinct MI210");
    assert_eq!(value["bus"]["bdf"], "0000:23:00.0");
}

#[test]
fn test_list_gpuvsmi_renames_identity_keys() {
    gpusmi()
        .args(["--format", "csv", "--compat", "gpuvsmi", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gpu_bdf"))
        .stdout(predicate::str::contains("gpu_uuid"));
}

#[test]
fn test_gpuvsmi_masks_unsupported_status() {
    gpusmi()
        .args(["--format", "csv", "--compat", "gpuvsmi", "--gpu", "1", "static"])
        .assert()
        .success()
        .stdout(predicate::str::contains("N/A"))
        .stdout(predicate::str::contains("AMDSMI_STATUS").not());
}

#[test]
fn test_unknown_device_id_fails() {
    gpusmi()
        .args(["--gpu", "7", "metric"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Device not found: 7"));
}

#[test]
fn test_file_destination_appends_across_runs() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("report.csv");

    for _ in 0..2 {
        gpusmi()
            .args(["--format", "csv", "--gpu", "0", "metric"])
            .args(["--file", path.to_str().expect("utf-8 path")])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    let content = std::fs::read_to_string(&path).expect("report written");
    assert_eq!(content.matches("gpu,").count(), 2);
}

#[test]
fn test_watch_flush_overwrites_file_with_history() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("watch.json");

    gpusmi()
        .args(["--format", "json", "--gpu", "0"])
        .args(["--file", path.to_str().expect("utf-8 path")])
        .args(["watch", "--iterations", "2", "--interval", "1"])
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).expect("history written");
    let history: serde_json::Value = serde_json::from_str(&content).expect("flush is one array");
    let samples = history.as_array().expect("array of samples");
    assert_eq!(samples.len(), 2);
    for sample in samples {
        assert!(sample["timestamp"].is_i64());
        assert_eq!(sample["values"]["gpu"], 0);
    }
}
