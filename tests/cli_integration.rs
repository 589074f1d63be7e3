//! CLI integration tests
//!
//! These tests verify the command-line interface behavior, including:
//! - Command parsing and validation
//! - Output formatting
//! - Exit codes
//! - The stdio protocol round-trip in serve mode

use std::env;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Helper to get the path to the drydock binary
fn drydock_bin() -> PathBuf {
    // In tests, the binary should be at target/debug/drydock
    let mut path = env::current_exe()
        .expect("Failed to get current executable path")
        .parent()
        .expect("No parent")
        .to_path_buf();

    // If we're in deps/, go up one more level
    if path.ends_with("deps") {
        path = path.parent().expect("No parent").to_path_buf();
    }

    path.join("drydock")
}

/// Helper to create a test Flask project
fn create_flask_project() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("requirements.txt"),
        "flask==3.0.0\ngunicorn==21.2.0\n",
    )
    .expect("Failed to write requirements.txt");
    fs::write(
        dir.path().join("app.py"),
        "from flask import Flask\n\napp = Flask(__name__)\n",
    )
    .expect("Failed to write app.py");
    dir
}

#[test]
fn test_cli_help() {
    let output = Command::new(drydock_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute drydock");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("drydock"));
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("scan"));
    assert!(stdout.contains("deploy"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(drydock_bin())
        .arg("--version")
        .output()
        .expect("Failed to execute drydock");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("drydock"));
}

#[test]
fn test_scan_text_output() {
    let project = create_flask_project();
    let output = Command::new(drydock_bin())
        .arg("scan")
        .arg(project.path())
        .output()
        .expect("Failed to execute drydock");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Repository Scan Results"));
    assert!(stdout.contains("python"));
    assert!(stdout.contains("flask"));
}

#[test]
fn test_scan_json_output() {
    let project = create_flask_project();
    let output = Command::new(drydock_bin())
        .arg("scan")
        .arg(project.path())
        .arg("--format")
        .arg("json")
        .output()
        .expect("Failed to execute drydock");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("scan --format json must emit valid JSON");
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["analysis"]["project_type"], "python");
}

#[test]
fn test_scan_missing_path_exits_nonzero() {
    let output = Command::new(drydock_bin())
        .arg("scan")
        .arg("/nonexistent/project")
        .output()
        .expect("Failed to execute drydock");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_chart_without_name_is_usage_error() {
    let project = create_flask_project();
    let output = Command::new(drydock_bin())
        .arg("chart")
        .arg(project.path())
        .output()
        .expect("Failed to execute drydock");

    // clap reports missing required arguments with exit code 2
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_dockerfile_writes_and_prints() {
    let project = create_flask_project();
    let output = Command::new(drydock_bin())
        .arg("dockerfile")
        .arg(project.path())
        .arg("--port")
        .arg("8080")
        .output()
        .expect("Failed to execute drydock");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("EXPOSE 8080"));
    assert!(project.path().join("Dockerfile").exists());
}

#[test]
fn test_serve_round_trip() {
    // Run from an empty directory so no config.yaml is picked up
    let workdir = TempDir::new().expect("Failed to create temp dir");

    let mut child = Command::new(drydock_bin())
        .arg("serve")
        .current_dir(workdir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn drydock serve");

    let mut stdin = child.stdin.take().expect("no stdin");
    let stdout = child.stdout.take().expect("no stdout");
    let mut reader = BufReader::new(stdout);

    writeln!(
        stdin,
        r#"{{"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {{}}}}"#
    )
    .expect("write initialize");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read initialize response");

    let response: serde_json::Value = serde_json::from_str(&line).expect("valid JSON frame");
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(response["result"]["serverInfo"]["name"], "drydock");

    writeln!(
        stdin,
        r#"{{"jsonrpc": "2.0", "id": 2, "method": "tools/list"}}"#
    )
    .expect("write tools/list");
    line.clear();
    reader.read_line(&mut line).expect("read tools/list response");

    let response: serde_json::Value = serde_json::from_str(&line).expect("valid JSON frame");
    let tools = response["result"]["tools"]
        .as_array()
        .expect("tools array");
    let names: Vec<&str> = tools
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert!(names.contains(&"scan_repository"));
    assert!(names.contains(&"minikube_deployment_workflow"));

    // Closing stdin shuts the server down cleanly
    drop(stdin);
    let status = child.wait().expect("server did not exit");
    assert!(status.success());
}
