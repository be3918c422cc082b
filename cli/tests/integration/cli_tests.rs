//! Integration tests for the gantry CLI skeleton: help, version, global flags.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn gantry() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gantry"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    gantry().assert().code(2).stderr(predicate::str::contains(
        "Fleet console for CI build agents",
    ));
}

#[test]
fn test_cli_help_flag_shows_help() {
    gantry()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    gantry()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gantry"));
}

#[test]
fn test_version_command_shows_version() {
    gantry()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gantry 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_version_key() {
    gantry()
        .arg("version")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version":"0.1.0""#));
}

// --- Command hierarchy tests ---

#[test]
fn test_help_shows_agents_command() {
    gantry()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("agents"));
}

#[test]
fn test_agents_help_shows_list_and_count() {
    gantry()
        .args(["agents", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("count"));
}

// --- Global flags tests ---

#[test]
fn test_global_quiet_flag_accepted() {
    gantry().args(["--quiet", "version"]).assert().success();
}

#[test]
fn test_global_no_color_flag_accepted() {
    gantry().args(["--no-color", "version"]).assert().success();
}

#[test]
fn test_no_color_env_var_accepted() {
    gantry()
        .env("NO_COLOR", "true")
        .arg("version")
        .assert()
        .success();
}

// --- Error handling tests ---

#[test]
fn test_unknown_command_exits_with_error() {
    gantry()
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_desc_without_sort_is_rejected() {
    gantry()
        .args(["agents", "list", "--desc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--sort"));
}
