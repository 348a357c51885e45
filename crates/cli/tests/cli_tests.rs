//! CLI integration tests

use std::process::{Command, Output};

fn crm(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crm"))
        .args(args)
        .env_remove("CRM_API_URL")
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = crm(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Cluster Resource Manager"),
        "Should show app name"
    );
    for command in ["clusters", "namespaces", "workloads", "compare", "browse"] {
        assert!(stdout.contains(command), "Should show {command} command");
    }
    assert!(stdout.contains("--api-url"), "Should show api-url option");
    assert!(stdout.contains("--format"), "Should show format option");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = crm(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("crm"), "Should show binary name");
}

#[test]
fn test_namespaces_requires_cluster_id() {
    let output = crm(&["namespaces"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("<CLUSTER_ID>"));
}

#[test]
fn test_compare_help() {
    let output = crm(&["compare", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Compare help should succeed");
    assert!(stdout.contains("<WORKLOAD_ID>"), "Should show workload argument");
}

#[test]
fn test_browse_help() {
    let output = crm(&["browse", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Browse help should succeed");
    assert!(stdout.contains("--cluster"));
    assert!(stdout.contains("--namespace"));
    assert!(stdout.contains("--workload"));
}

#[test]
fn test_invalid_format_is_rejected() {
    let output = crm(&["--format", "yaml", "clusters"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("yaml"));
}

#[test]
fn test_invalid_api_url_fails_cleanly() {
    let output = crm(&["--api-url", "not a url", "clusters"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid API URL"));
}
