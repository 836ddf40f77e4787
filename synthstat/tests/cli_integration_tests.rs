//! Command-line integration tests for the `synthstat` binary.
//!
//! Every run passes `--no-display` or relies on stdout being a pipe, so the
//! interactive viewer never opens. `XDG_CONFIG_HOME` points at an empty
//! temporary directory so a developer's own config file cannot leak in.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

use strip_ansi_escapes::strip as strip_ansi_escapes_fn;

const LABELS: [&str; 5] = [
    "Mean of X",
    "Mean of Y",
    "Standard Deviation of X",
    "Standard Deviation of Y",
    "Correlation Coefficient",
];

fn synthstat(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("synthstat"));
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("SYNTHSTAT_CONFIG");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes_fn(&output.stdout)).to_string()
}

#[test]
fn default_run_prints_five_statistics() -> Result<()> {
    let home = TempDir::new()?;
    let output = synthstat(&home).arg("--no-display").output()?;
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5, "unexpected stdout: {}", stdout);

    for (line, label) in lines.iter().zip(LABELS) {
        let value = line
            .strip_prefix(&format!("{}: ", label))
            .unwrap_or_else(|| panic!("'{}' does not start with '{}'", line, label));
        let (_, decimals) = value.split_once('.').expect("value has a decimal point");
        assert_eq!(decimals.len(), 2, "'{}' should have two decimals", line);
        value.parse::<f64>()?;
    }
    Ok(())
}

#[test]
fn output_is_reproducible_and_seed_dependent() -> Result<()> {
    let home = TempDir::new()?;
    let first = synthstat(&home).arg("--no-display").output()?;
    let second = synthstat(&home).arg("--no-display").output()?;
    let reseeded = synthstat(&home).args(["--no-display", "--seed", "7"]).output()?;

    assert_eq!(first.stdout, second.stdout);
    assert_ne!(first.stdout, reseeded.stdout);
    Ok(())
}

#[test]
fn non_terminal_stdout_skips_the_viewer() -> Result<()> {
    let home = TempDir::new()?;
    synthstat(&home)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Mean of X: "))
        .stderr(predicate::str::contains("skipping the interactive viewer"));
    Ok(())
}

#[test]
fn quiet_suppresses_stderr() -> Result<()> {
    let home = TempDir::new()?;
    synthstat(&home)
        .arg("-q")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
    Ok(())
}

#[test]
fn malformed_shape_prints_one_error_line_and_exits_zero() -> Result<()> {
    let home = TempDir::new()?;
    let output = synthstat(&home).args(["--no-display", "--rows", "0"]).output()?;
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "unexpected stdout: {}", stdout);
    assert!(lines[0].starts_with("An error occurred:"));
    assert!(!stdout.contains("Mean of X"));
    Ok(())
}

#[test]
fn strict_mode_exits_non_zero() -> Result<()> {
    let home = TempDir::new()?;
    synthstat(&home)
        .args(["--no-display", "--samples", "0", "--strict"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("An error occurred:"));
    Ok(())
}

#[test]
fn unreadable_config_is_reported_through_the_error_line() -> Result<()> {
    let home = TempDir::new()?;
    let mut file = NamedTempFile::new()?;
    writeln!(file, "generator: [1, 2, 3]")?;

    synthstat(&home)
        .arg("--no-display")
        .arg("--config")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("An error occurred: Failed to parse config file"));
    Ok(())
}

#[test]
fn config_file_from_environment_is_used() -> Result<()> {
    let home = TempDir::new()?;
    let mut file = NamedTempFile::new()?;
    writeln!(file, "generator:\n  noise: -1.0")?;

    synthstat(&home)
        .arg("--no-display")
        .env("SYNTHSTAT_CONFIG", file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("`noise` must be non-negative"));
    Ok(())
}

#[test]
fn json_report_matches_printed_statistics() -> Result<()> {
    let home = TempDir::new()?;
    let dir = TempDir::new()?;
    let json_path = dir.path().join("report.json");

    let output = synthstat(&home)
        .arg("--no-display")
        .arg("--json")
        .arg(&json_path)
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path)?)?;
    let mean_x = report["statistics"]["mean_x"].as_f64().unwrap();
    let corr = report["statistics"]["corr_coef"].as_f64().unwrap();

    let stdout = stdout_of(&output);
    assert!(stdout.contains(&format!("Mean of X: {:.2}", mean_x)));
    assert!(stdout.contains(&format!("Correlation Coefficient: {:.2}", corr)));
    assert!((-1.0..=1.0).contains(&corr));
    assert_eq!(report["config"]["generator"]["samples"], 50);
    Ok(())
}

#[test]
fn summary_table_goes_to_stderr() -> Result<()> {
    let home = TempDir::new()?;
    let output = synthstat(&home).args(["--no-display", "--table"]).output()?;
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&strip_ansi_escapes_fn(&output.stderr)).to_string();
    assert!(stderr.contains("Regression Slope"));
    assert_eq!(stdout_of(&output).lines().count(), 5);
    Ok(())
}

#[test]
fn unsupported_figure_extension_is_an_error_line() -> Result<()> {
    let home = TempDir::new()?;
    synthstat(&home)
        .args(["--no-display", "--save-figure", "figure.tiff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unsupported figure extension"));
    Ok(())
}

#[test]
fn oversized_shape_is_an_error_line_not_a_crash() -> Result<()> {
    let home = TempDir::new()?;
    let output = synthstat(&home)
        .args(["--no-display", "-q", "--rows", "9223372036854775807", "--cols", "2"])
        .output()?;
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert_eq!(stdout.lines().count(), 1, "unexpected stdout: {}", stdout);
    assert!(stdout.starts_with("An error occurred: Configuration validation failed"));
    assert!(stdout.contains("exceeds 1000000 cells"));
    Ok(())
}

#[test]
fn single_sample_is_rejected_up_front() -> Result<()> {
    let home = TempDir::new()?;
    synthstat(&home)
        .args(["--no-display", "--samples", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("`samples` must be between 2 and 1000000, got 1."));
    Ok(())
}

#[test]
fn saved_figure_is_written_and_announced() -> Result<()> {
    let home = TempDir::new()?;
    let dir = TempDir::new()?;
    let figure = dir.path().join("figure.svg");

    let output = synthstat(&home)
        .arg("--no-display")
        .arg("--save-figure")
        .arg(&figure)
        .output()?;
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).lines().count(), 5);

    assert!(fs::metadata(&figure)?.len() > 0);
    let stderr = String::from_utf8_lossy(&strip_ansi_escapes_fn(&output.stderr)).to_string();
    assert!(stderr.contains(&format!("Figure saved to {}", figure.display())));
    Ok(())
}
