//! Smoke tests for argument handling; none of these reach the database

use assert_cmd::Command;
use predicates::prelude::*;

fn staffing() -> Command {
    Command::cargo_bin("staffing").unwrap()
}

#[test]
fn test_help_lists_commands() {
    staffing()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create-project"))
        .stdout(predicate::str::contains("assign"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn test_create_project_help() {
    staffing()
        .args(["create-project", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("YYYY-MM-DD"))
        .stdout(predicate::str::contains("must be a manager"));
}

#[test]
fn test_seed_help() {
    staffing()
        .args(["seed", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TOML fixture file"));
}

#[test]
fn test_rejects_malformed_date() {
    staffing()
        .args([
            "create-project",
            "--title",
            "ERP",
            "--start",
            "2024-13-01",
            "--end",
            "2024-12-31",
            "--budget",
            "1000",
            "--client",
            "H65740417",
            "--lead",
            "17520760G",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date '2024-13-01'"));
}

#[test]
fn test_assign_requires_numeric_project() {
    staffing()
        .args(["assign", "--employee", "60657870Q", "--project", "uno"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--project"));
}

#[test]
fn test_requires_a_command() {
    staffing().assert().failure();
}
