//! Tests for CLI argument parsing and the binary

use assert_cmd::Command;
use autoeda::cli::{Cli, DEFAULT_DATA_URL};
use autoeda::pipeline::{DataSource, EdaConfig, DEFAULT_TARGET};
use autoeda::report::SinkKind;
use clap::Parser;
use predicates::prelude::*;
use std::path::PathBuf;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["autoeda", "--source", DEFAULT_DATA_URL]);

    assert_eq!(cli.out_dir, PathBuf::from("eda_output"));
    assert_eq!(cli.sink, SinkKind::Auto);
    assert_eq!(cli.target, DEFAULT_TARGET);
    assert_eq!(cli.eda_config().target, EdaConfig::default().target);
    assert_eq!(cli.top_k, 8);
    assert_eq!(cli.category_top, 15);
    assert_eq!(cli.head_rows, 10);
    assert!(!cli.bundle);
    assert!(!cli.interactive);
    assert!(!cli.quiet);
    assert_eq!(cli.data_source(), DataSource::Url(DEFAULT_DATA_URL.to_string()));
}

#[test]
fn test_cli_custom_values() {
    let cli = Cli::parse_from([
        "autoeda",
        "-s",
        "data/cars.csv",
        "-o",
        "out",
        "--sink",
        "memory",
        "--top-k",
        "3",
        "--head-rows",
        "0",
        "--bundle",
        "-q",
    ]);

    assert_eq!(cli.data_source(), DataSource::Path("data/cars.csv".into()));
    assert_eq!(cli.sink, SinkKind::Memory);

    let config = cli.eda_config();
    assert_eq!(config.top_k, 3);
    assert_eq!(config.head_rows, 0);
    assert!(!config.show_progress, "Quiet runs hide spinners");
    assert!(cli.bundle);
}

#[test]
fn test_cli_rejects_zero_counts() {
    assert!(Cli::try_parse_from(["autoeda", "-s", "x.csv", "--top-k", "0"]).is_err());
    assert!(Cli::try_parse_from(["autoeda", "-s", "x.csv", "--category-top", "0"]).is_err());
    assert!(Cli::try_parse_from(["autoeda", "-s", "x.csv", "--sink", "bucket"]).is_err());
}

#[test]
fn test_binary_quiet_run_writes_artifacts() {
    let (temp_dir, csv_path) = create_temp_csv(CARS_CSV);
    let out_dir = temp_dir.path().join("out");

    Command::cargo_bin("autoeda")
        .unwrap()
        .arg("--source")
        .arg(&csv_path)
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("overview: 7 rows x 18 columns"))
        .stdout(predicate::str::contains("engineered: power_to_weight"));

    assert!(out_dir.join("overview.json").exists());
    assert!(out_dir.join("cat-make.json").exists());
    assert!(out_dir.join("cars_prepared.csv").exists());
}

#[test]
fn test_binary_fails_on_missing_source() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    Command::cargo_bin("autoeda")
        .unwrap()
        .arg("--source")
        .arg(temp_dir.path().join("absent.csv"))
        .arg("--out-dir")
        .arg(temp_dir.path().join("out"))
        .arg("--quiet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.csv"));
}
