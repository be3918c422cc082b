//! End-to-end tests for `gantry agents` over real snapshot files.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gantry() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gantry"));
    cmd.env("NO_COLOR", "1");
    cmd
}

const FLEET_SNAPSHOT: &str = r#"[
    {
        "uuid": "uuid-windows",
        "hostname": "Hostname-ABC",
        "ip_address": "10.1.20.5",
        "sandbox": "C:\\go\\sandbox",
        "operating_system": "Windows 10",
        "agent_config_state": "Enabled",
        "agent_state": "Building",
        "build_state": "Building",
        "free_space": 93259825152,
        "resources": ["firefox"],
        "environments": [{"name": "prod", "origin": {"type": "server"}}]
    },
    {
        "uuid": "uuid-linux",
        "hostname": "Hostname-XYZ",
        "ip_address": "10.1.20.6",
        "sandbox": "/var/lib/xx-sandbox",
        "operating_system": "Ubuntu 22.04",
        "agent_config_state": "Enabled",
        "agent_state": "Idle",
        "build_state": "Idle",
        "free_space": 2859874304,
        "resources": []
    },
    {
        "uuid": "uuid-mac",
        "hostname": "agent-mac",
        "operating_system": "Mac OS X",
        "agent_config_state": "Pending",
        "free_space": "unknown"
    },
    {
        "uuid": "uuid-elastic",
        "hostname": "elastic-01",
        "operating_system": "Alpine 3.19",
        "agent_config_state": "Enabled",
        "agent_state": "Idle",
        "build_state": "Idle",
        "free_space": 10737418240,
        "elastic_agent_id": "ea-1",
        "elastic_plugin_id": "cd.go.contrib.elasticagent.kubernetes"
    }
]"#;

/// Write the fixture snapshot and return (dir guard, path string).
fn snapshot_file() -> (TempDir, String) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("agents.json");
    std::fs::write(&path, FLEET_SNAPSHOT).expect("write snapshot");
    let path = path.to_string_lossy().into_owned();
    (dir, path)
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("run gantry");
    assert!(output.status.success(), "command failed: {output:?}");
    String::from_utf8(output.stdout).expect("utf-8 stdout")
}

// --- Listing and filtering ---

#[test]
fn test_list_shows_static_agents_only_by_default() {
    let (_dir, path) = snapshot_file();
    gantry()
        .args(["agents", "list", "--snapshot", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hostname-ABC"))
        .stdout(predicate::str::contains("Hostname-XYZ"))
        .stdout(predicate::str::contains("agent-mac"))
        .stdout(predicate::str::contains("elastic-01").not());
}

#[test]
fn test_list_elastic_flag_shows_elastic_agents_only() {
    let (_dir, path) = snapshot_file();
    gantry()
        .args(["agents", "list", "--snapshot", &path, "--elastic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("elastic-01"))
        .stdout(predicate::str::contains("Hostname-ABC").not());
}

#[test]
fn test_list_filter_is_case_insensitive_substring() {
    let (_dir, path) = snapshot_file();
    gantry()
        .args(["agents", "list", "--snapshot", &path, "--filter", "-AbC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hostname-ABC"))
        .stdout(predicate::str::contains("Hostname-XYZ").not());
}

#[test]
fn test_list_filter_matches_operating_system() {
    let (_dir, path) = snapshot_file();
    gantry()
        .args(["agents", "list", "--snapshot", &path, "--filter", "WiNdOwS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hostname-ABC"))
        .stdout(predicate::str::contains("agent-mac").not());
}

#[test]
fn test_list_state_splits_pending_agents() {
    let (_dir, path) = snapshot_file();
    gantry()
        .args(["agents", "list", "--snapshot", &path, "--state", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("agent-mac"))
        .stdout(predicate::str::contains("Hostname-ABC").not());
}

#[test]
fn test_list_renders_status_labels_and_readable_free_space() {
    let (_dir, path) = snapshot_file();
    gantry()
        .args(["agents", "list", "--snapshot", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Building"))
        .stdout(predicate::str::contains("Pending"))
        .stdout(predicate::str::contains("Unknown"))
        .stdout(predicate::str::contains("86.9 GB"));
}

// --- Sorting ---

#[test]
fn test_list_sort_hostname_ascending() {
    let (_dir, path) = snapshot_file();
    let stdout = stdout_of(gantry().args([
        "agents", "list", "--snapshot", &path, "--sort", "hostname",
    ]));
    let mac = stdout.find("agent-mac").expect("agent-mac shown");
    let abc = stdout.find("Hostname-ABC").expect("Hostname-ABC shown");
    let xyz = stdout.find("Hostname-XYZ").expect("Hostname-XYZ shown");
    assert!(mac < abc && abc < xyz, "expected agent-mac, Hostname-ABC, Hostname-XYZ order");
}

#[test]
fn test_list_sort_hostname_descending() {
    let (_dir, path) = snapshot_file();
    let stdout = stdout_of(gantry().args([
        "agents", "list", "--snapshot", &path, "--sort", "hostname", "--desc",
    ]));
    let mac = stdout.find("agent-mac").expect("agent-mac shown");
    let xyz = stdout.find("Hostname-XYZ").expect("Hostname-XYZ shown");
    assert!(xyz < mac, "descending must reverse the ascending order");
}

#[test]
fn test_list_sort_status_ranks_pending_first() {
    let (_dir, path) = snapshot_file();
    let stdout = stdout_of(gantry().args([
        "agents", "list", "--snapshot", &path, "--sort", "status",
    ]));
    let pending = stdout.find("agent-mac").expect("pending agent shown");
    let building = stdout.find("Hostname-ABC").expect("building agent shown");
    let idle = stdout.find("Hostname-XYZ").expect("idle agent shown");
    assert!(pending < building && building < idle);
}

#[test]
fn test_list_sort_free_space_puts_unknown_last_ascending() {
    let (_dir, path) = snapshot_file();
    let stdout = stdout_of(gantry().args([
        "agents", "list", "--snapshot", &path, "--sort", "free-space",
    ]));
    let small = stdout.find("Hostname-XYZ").expect("2.7 GB agent shown");
    let big = stdout.find("Hostname-ABC").expect("86.9 GB agent shown");
    let unknown = stdout.find("agent-mac").expect("unknown-space agent shown");
    assert!(small < big && big < unknown);
}

#[test]
fn test_list_sort_resources_rejected_on_elastic_table() {
    let (_dir, path) = snapshot_file();
    gantry()
        .args(["agents", "list", "--snapshot", &path, "--elastic", "--sort", "resources"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not sortable"));
}

// --- JSON output ---

#[test]
fn test_list_json_outputs_agent_array() {
    let (_dir, path) = snapshot_file();
    let stdout = stdout_of(gantry().args(["agents", "list", "--snapshot", &path, "--json"]));
    let agents: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let uuids: Vec<&str> = agents
        .as_array()
        .expect("array")
        .iter()
        .map(|a| a["uuid"].as_str().expect("uuid"))
        .collect();
    assert_eq!(uuids, vec!["uuid-windows", "uuid-linux", "uuid-mac"]);
}

#[test]
fn test_count_json_reports_state_split() {
    let (_dir, path) = snapshot_file();
    let stdout = stdout_of(gantry().args(["agents", "count", "--snapshot", &path, "--json"]));
    let counts: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(counts["total"], 4);
    assert_eq!(counts["matching"], 4);
    assert_eq!(counts["pending"], 1);
    assert_eq!(counts["enabled"], 3);
    assert_eq!(counts["disabled"], 0);
}

#[test]
fn test_count_filter_restricts_matching() {
    let (_dir, path) = snapshot_file();
    let stdout = stdout_of(gantry().args([
        "agents", "count", "--snapshot", &path, "--filter", "windows", "--json",
    ]));
    let counts: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(counts["total"], 4);
    assert_eq!(counts["matching"], 1);
}

// --- Snapshot sources and error paths ---

#[test]
fn test_list_reads_snapshot_from_stdin_by_default() {
    gantry()
        .args(["agents", "list"])
        .write_stdin(FLEET_SNAPSHOT)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hostname-ABC"));
}

#[test]
fn test_list_accepts_embedded_envelope_document() {
    let envelope = format!(r#"{{"_embedded": {{"agents": {FLEET_SNAPSHOT}}}}}"#);
    gantry()
        .args(["agents", "list"])
        .write_stdin(envelope)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hostname-XYZ"));
}

#[test]
fn test_list_missing_snapshot_file_fails_with_path_in_message() {
    gantry()
        .args(["agents", "list", "--snapshot", "/nonexistent/agents.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/agents.json"));
}

#[test]
fn test_list_json_failure_emits_error_object() {
    gantry()
        .args(["agents", "list", "--snapshot", "/nonexistent/agents.json", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""error": true"#))
        .stdout(predicate::str::contains("SNAPSHOT_UNREADABLE"));
}

#[test]
fn test_list_malformed_snapshot_fails() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("agents.json");
    std::fs::write(&path, b"{ not a snapshot").expect("write file");
    gantry()
        .args(["agents", "list", "--snapshot", &path.to_string_lossy()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing snapshot"));
}
