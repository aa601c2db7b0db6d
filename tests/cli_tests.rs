// CLI argument contract tests

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_missing_arguments_prints_usage() {
    Command::cargo_bin("dockup")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_max_days_prints_usage() {
    Command::cargo_bin("dockup")
        .unwrap()
        .arg("/tmp/backups")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_zero_max_days_rejected() {
    Command::cargo_bin("dockup")
        .unwrap()
        .args(["/tmp/backups", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("0"));
}

#[test]
fn test_non_numeric_max_days_rejected() {
    Command::cargo_bin("dockup")
        .unwrap()
        .args(["/tmp/backups", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_help_names_positional_arguments() {
    Command::cargo_bin("dockup")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("BACKUP_DIR"))
        .stdout(predicate::str::contains("MAX_DAYS"));
}
