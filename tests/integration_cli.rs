//! End-to-end tests running the built binary.

mod common;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_solar-battery-sim"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "warn")
        .output()
        .expect("binary should start")
}

fn write_config(dir: &Path, body: &str) -> String {
    common::write_sunrise_file(dir);
    common::write_consumption_file(dir, 0.5);
    let path = dir.join("house.toml");
    fs::write(&path, body).unwrap();
    path.display().to_string()
}

#[test]
fn runs_projection_and_writes_reports() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "BATTERY_SIZE = 5.0\nSOLAR_SIZE = 3.0\nYEARS = 2\nEQUIPMENT_COST = 4000.0\n",
    );
    let csv_path = dir.path().join("years.csv");
    let json_path = dir.path().join("years.json");
    let log_dir = dir.path().join("logs");
    fs::create_dir(&log_dir).unwrap();

    let output = run(
        &[
            &config,
            "--report-csv",
            &csv_path.display().to_string(),
            "--report-json",
            &json_path.display().to_string(),
            "--diagnostics-dir",
            &log_dir.display().to_string(),
        ],
        dir.path(),
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Year 1 - Total cost: "));
    assert!(stdout.contains("Year 2 - Total cost: "));
    assert!(stdout.contains("Load used"));

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 3);

    let json = fs::read_to_string(&json_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["years"].as_array().map(Vec::len), Some(2));
    assert!(value["first_year"]["grid"]["cost"].is_number());

    let log = fs::read_to_string(log_dir.join("data_bat5.000000_sol3.000000.csv")).unwrap();
    assert_eq!(log.lines().count(), 8761);
    assert!(log.starts_with("mode,day,hour,load,"));
}

#[test]
fn years_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "YEARS = 10\n");

    let output = run(&[&config, "--years", "1", "--quiet"], dir.path());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Year 1 - "));
    assert!(!stdout.contains("Year 2 - "));
    assert!(!stdout.contains("Load used"));
}

#[test]
fn invalid_config_fails_with_field_name() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "YEARS = 0\n");

    let output = run(&[&config], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("YEARS"));
}

#[test]
fn unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "BATTERY_SIZ = 5.0\n");

    let output = run(&[&config], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("BATTERY_SIZ"));
}

#[test]
fn incomplete_consumption_fails_with_slot() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "YEARS = 1\n");
    let consumption = dir.path().join("consumption.csv");
    let text = fs::read_to_string(&consumption).unwrap();
    let truncated: String = text.lines().take(1000).map(|l| format!("{l}\n")).collect();
    fs::write(&consumption, truncated).unwrap();

    let output = run(&[&config], dir.path());
    assert!(!output.status.success());
    // 999 readings cover day 42 up to 14:00
    assert!(String::from_utf8_lossy(&output.stderr).contains("day 42 hour 15"));
}
