/// Binary-level tests.
///
/// These run the built `census-report` executable against a CSV in a
/// temporary directory and inspect what it writes to stdout.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_two_row_csv(dir: &Path) -> PathBuf {
    let path = dir.join("adult.data.csv");
    fs::write(
        &path,
        "race,sex,age,education,hours-per-week,native-country,occupation,salary\n\
         White,Male,30,Bachelors,40,United-States,Exec-managerial,>50K\n\
         White,Male,50,HS-grad,40,United-States,Sales,<=50K\n",
    )
    .unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_census-report"))
        .args(args)
        .output()
        .expect("failed to launch census-report");
    assert!(
        output.status.success(),
        "census-report failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

// ── Output modes ─────────────────────────────────────────────────────────────

/// `--json` alone must leave stdout as a single JSON document.
#[test]
fn json_stdout_is_a_single_document() {
    let dir = TempDir::new().unwrap();
    let data = write_two_row_csv(dir.path());

    let output = run(&["--data", data.to_str().unwrap(), "--json"]);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("Number of each race:"), "transcript leaked: {stdout}");

    let value: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is not JSON");
    assert!(value["generated_at"].is_string());
    assert_eq!(value["report"]["race_count"]["White"], 2);
    assert_eq!(value["report"]["average_age_men"], 40.0);
    assert_eq!(value["report"]["highest_earning_country"], "United-States");
    assert!(value["report"]["top_IN_occupation"].is_null());
}

#[test]
fn default_run_prints_the_transcript() {
    let dir = TempDir::new().unwrap();
    let data = write_two_row_csv(dir.path());

    let output = run(&["--data", data.to_str().unwrap()]);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Number of each race:\n"));
    assert!(stdout.contains("Min work time: 40 hours/week\n"));
    assert!(stdout.ends_with("Top occupations in India: n/a\n"));
}

#[test]
fn quiet_run_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let data = write_two_row_csv(dir.path());

    let output = run(&["--data", data.to_str().unwrap(), "--quiet"]);
    assert!(output.stdout.is_empty());
}
