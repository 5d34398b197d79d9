//! Failure-path tests for the daylog binary.
//!
//! These tests verify the process exits non-zero, without writing a
//! snapshot, when:
//! - No input is supplied
//! - An input file is missing or unreadable
//! - A timestamp cannot be parsed
//! - The config names an unknown timezone

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("daylog"));
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("RUST_LOG")
        .current_dir(dir);
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_merge_requires_an_input() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("merge")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--sleep-data"));

    assert!(!temp_dir.path().join("merged.json").exists());
}

#[test]
fn test_generate_requires_a_stream() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No generation option provided"));
}

#[test]
fn test_merge_has_no_csv_output() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    let sleep = dir.join("sleep.json");
    fs::write(
        &sleep,
        r#"[{"start": "2023-10-01T08:00:00Z", "end": "2023-10-01T16:00:00Z", "duration_hours": 8}]"#,
    )
    .unwrap();

    cli(dir)
        .arg("merge")
        .arg("-s")
        .arg(&sleep)
        .arg("--csv")
        .arg(dir.join("days.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--csv"));

    assert!(!dir.join("days.csv").exists());
    assert!(!dir.join("merged.json").exists());
}

#[test]
fn test_missing_sleep_file() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    cli(dir)
        .arg("merge")
        .arg("-s")
        .arg(dir.join("does-not-exist.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("MissingFile"));

    assert!(!dir.join("merged.json").exists());
}

#[test]
fn test_missing_activity_file_with_valid_sleep_file() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    let sleep = dir.join("sleep.json");
    fs::write(
        &sleep,
        r#"[{"start": "2023-10-01T08:00:00Z", "end": "2023-10-01T16:00:00Z", "duration_hours": 8}]"#,
    )
    .unwrap();

    cli(dir)
        .arg("merge")
        .arg("-s")
        .arg(&sleep)
        .arg("-a")
        .arg(dir.join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));

    assert!(!dir.join("merged.json").exists());
}

#[test]
fn test_malformed_timestamp_aborts_without_snapshot() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    let activity = dir.join("workouts.json");
    fs::write(
        &activity,
        r#"{"workouts": [
  {"id": 1, "type": "Yoga", "timestamp_local": "2023-10-01 08:00:00 PDT", "duration_minutes": 30, "calories_burned": 120},
  {"id": 2, "type": "Yoga", "timestamp_local": "Oct 2nd, morning", "duration_minutes": 30, "calories_burned": 120}
]}"#,
    )
    .unwrap();

    cli(dir)
        .arg("merge")
        .arg("-a")
        .arg(&activity)
        .assert()
        .failure()
        .stderr(predicate::str::contains("MalformedTimestamp"));

    assert!(!dir.join("merged.json").exists());
}

#[test]
fn test_invalid_json_input() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    let sleep = dir.join("sleep.json");
    fs::write(&sleep, "[{ truncated").unwrap();

    cli(dir)
        .arg("merge")
        .arg("-s")
        .arg(&sleep)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Json"));
}

#[test]
fn test_unknown_zone_in_config() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    let config = dir.join("daylog.toml");
    fs::write(&config, "[zone]\nreference = \"Nowhere/Special\"\n").unwrap();

    cli(dir)
        .arg("generate")
        .arg("-s")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nowhere/Special"));
}

#[test]
fn test_unknown_zone_flag() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("generate")
        .arg("-a")
        .arg("--zone")
        .arg("Pacific Time")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown timezone"));
}
