//! Tests for the command-line binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::fixture_path;

fn ruian_import() -> Command {
    let mut cmd = Command::cargo_bin("ruian-import").unwrap();
    cmd.env_remove("DATABASE_URL")
        .env_remove("RUST_LOG")
        .env_remove("CLICOLOR_FORCE");
    cmd
}

#[test]
fn test_dry_run_imports_fixture() {
    ruian_import()
        .args(["import", "--dry-run"])
        .arg(fixture_path("20240131_ST_UZSZ.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("20240131_ST_UZSZ.xml 8 statements"))
        .stdout(predicate::str::contains("unknown elements: 1"))
        .stdout(predicate::str::contains("Done:"));
}

#[test]
fn test_dry_run_writes_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("unknown.log");

    ruian_import()
        .args(["import", "--dry-run", "--log-file"])
        .arg(&log)
        .arg(fixture_path("20240131_ST_UZSZ.xml"))
        .assert()
        .success();

    let content = std::fs::read_to_string(&log).unwrap();
    assert!(content.starts_with("Ignoring unknown element"));
}

#[test]
fn test_missing_input_fails() {
    ruian_import()
        .args(["import", "--dry-run", "/nonexistent/20240131_ST_UZSZ.xml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_missing_database_url_fails() {
    ruian_import()
        .arg("import")
        .arg(fixture_path("20240131_ST_UZSZ.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_empty_directory_fails() {
    let dir = tempfile::tempdir().unwrap();

    ruian_import()
        .args(["import", "--dry-run"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no documents found"));
}
