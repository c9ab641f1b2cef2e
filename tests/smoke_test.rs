//! Smoke tests for the vxc CLI.
//!
//! These tests verify basic CLI functionality:
//! - `vxc --version` outputs version info
//! - `vxc --help` outputs help text
//! - `vxc` without a command fails with usage

mod common;

use assert_cmd::Command;
use common::TestEnv;
use predicates::prelude::*;

/// Get a Command for the vxc binary.
fn vxc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vxc"))
}

#[test]
fn test_version_flag() {
    vxc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vxc"))
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_help_flag() {
    vxc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn test_no_command_shows_usage() {
    vxc()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_unknown_notebook_type_rejected() {
    let env = TestEnv::new();
    env.vxc()
        .args(["session", "add", ".", "--type", "zip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown notebook type"));
}

#[test]
fn test_logs_go_to_stderr() {
    let env = TestEnv::new();
    let output = env
        .vxc()
        .args(["config", "--log-level", "debug"])
        .output()
        .unwrap();

    assert!(output.status.success());
    // stdout must stay pure JSON even with debug logging on
    common::parse_json(&output.stdout);
    assert!(String::from_utf8_lossy(&output.stderr).contains("loaded configuration"));
}
