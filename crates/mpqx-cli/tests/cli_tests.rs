//! Integration tests for the mpqx binary.
//!
//! These exercise the externally observable contract: flag parsing, the
//! exit-code mapping, and the diagnostics that never need a real archive.
//! Behavior against archive content is covered by mpqx-core's suites via
//! the in-memory collaborator.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn mpqx_cmd() -> Command {
    cargo_bin_cmd!("mpqx")
}

#[test]
fn test_help_flag() {
    mpqx_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lists and extracts files"));
}

#[test]
fn test_version_flag_short() {
    mpqx_cmd()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("libmpq"));
}

#[test]
fn test_missing_action_exits_one() {
    mpqx_cmd().arg("game.mpq").assert().failure().code(1);
}

#[test]
fn test_missing_archive_exits_one() {
    mpqx_cmd().arg("--list").assert().failure().code(1);
}

#[test]
fn test_unrecognized_option_exits_one() {
    mpqx_cmd()
        .arg("--frobnicate")
        .arg("game.mpq")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_list_and_extract_conflict_exits_one() {
    mpqx_cmd()
        .arg("-l")
        .arg("-e")
        .arg("game.mpq")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_entry_number_zero_rejected_before_open() {
    // The archive path does not exist; the number must be rejected first.
    mpqx_cmd()
        .arg("--extract")
        .arg("/no/such/archive.mpq")
        .arg("0")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid file number '0'"));
}

#[test]
fn test_non_numeric_entry_number_rejected() {
    mpqx_cmd()
        .arg("--list")
        .arg("/no/such/archive.mpq")
        .arg("seven")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid file number 'seven'"));
}

#[test]
fn test_missing_archive_file_diagnostic() {
    mpqx_cmd()
        .arg("--list")
        .arg("/no/such/archive.mpq")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "'/no/such/archive.mpq' no such file or directory",
        ));
}

#[test]
fn test_non_archive_file_fails_to_open() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("not-an-archive.mpq");
    std::fs::write(&path, b"this is not an mpq archive").unwrap();

    mpqx_cmd()
        .arg("--list")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no such file or directory"));
}
