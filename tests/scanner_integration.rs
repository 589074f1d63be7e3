//! Integration tests for the repository scanner
//!
//! These tests verify the complete workflow of scanning different kinds
//! of projects: classification, manifest parsing, framework detection
//! and entry point discovery, plus the rendered summary.

use drydock::analysis::{format_scan_result, ProjectType, RepositoryScanner};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a Flask project fixture
fn create_flask_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(
        root.join("requirements.txt"),
        "flask==3.0.0\ngunicorn==21.2.0\nrequests>=2.31\n",
    )
    .unwrap();

    fs::write(
        root.join("app.py"),
        r#"from flask import Flask

app = Flask(__name__)

@app.route('/')
def index():
    return 'hello'

if __name__ == '__main__':
    app.run()
"#,
    )
    .unwrap();

    fs::create_dir(root.join("templates")).unwrap();
    fs::write(root.join("templates/index.html"), "<html></html>\n").unwrap();

    temp_dir
}

/// Helper to create an Express project fixture
fn create_express_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(
        root.join("package.json"),
        r#"{
  "name": "test-app",
  "version": "1.0.0",
  "main": "src/index.js",
  "dependencies": {
    "express": "^4.18.0",
    "pg": "^8.11.0"
  }
}
"#,
    )
    .unwrap();

    fs::create_dir(root.join("src")).unwrap();
    fs::write(
        root.join("src/index.js"),
        "const express = require('express');\nconst app = express();\napp.listen(3000);\n",
    )
    .unwrap();

    temp_dir
}

/// Helper to create a Go project fixture
fn create_go_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(
        root.join("go.mod"),
        r#"module example.com/test

go 1.21

require (
	github.com/gin-gonic/gin v1.9.0
	github.com/stretchr/testify v1.8.4
)
"#,
    )
    .unwrap();

    fs::write(
        root.join("main.go"),
        r#"package main

import "github.com/gin-gonic/gin"

func main() {
	r := gin.Default()
	r.Run()
}
"#,
    )
    .unwrap();

    temp_dir
}

/// Helper to create a Rust project fixture
fn create_rust_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(
        root.join("Cargo.toml"),
        "[package]\nname = \"test-project\"\nversion = \"0.1.0\"\n",
    )
    .unwrap();

    fs::create_dir(root.join("src")).unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {}\n").unwrap();

    temp_dir
}

#[tokio::test]
async fn test_scan_flask_project() {
    let project = create_flask_project();
    let scanner = RepositoryScanner::new();

    let result = scanner.scan(project.path()).await;

    assert!(result.success);
    assert_eq!(result.files_scanned, 3);

    let analysis = result.analysis.unwrap();
    assert_eq!(analysis.project_type, ProjectType::Python);
    assert_eq!(analysis.language, "python");
    assert_eq!(analysis.framework.as_deref(), Some("flask"));
    assert_eq!(analysis.package_manager.as_deref(), Some("pip"));

    // Versions are stripped from requirement lines
    assert!(analysis.dependencies.contains(&"flask".to_string()));
    assert!(analysis.dependencies.contains(&"gunicorn".to_string()));
    assert!(analysis.dependencies.contains(&"requests".to_string()));

    assert!(analysis.entry_points.contains(&PathBuf::from("app.py")));
    assert_eq!(analysis.static_files.len(), 1);
}

#[tokio::test]
async fn test_scan_express_project() {
    let project = create_express_project();
    let scanner = RepositoryScanner::new();

    let result = scanner.scan(project.path()).await;

    assert!(result.success);
    let analysis = result.analysis.unwrap();
    assert_eq!(analysis.project_type, ProjectType::Node);
    assert_eq!(analysis.language, "javascript");
    assert_eq!(analysis.framework.as_deref(), Some("express"));
    // No lockfile in the fixture, npm is the fallback
    assert_eq!(analysis.package_manager.as_deref(), Some("npm"));
    assert!(analysis.dependencies.contains(&"express".to_string()));
    assert!(analysis.dependencies.contains(&"pg".to_string()));

    // package.json "main" wins over file name conventions
    assert_eq!(analysis.entry_points, vec![PathBuf::from("src/index.js")]);
}

#[tokio::test]
async fn test_scan_go_project() {
    let project = create_go_project();
    let scanner = RepositoryScanner::new();

    let result = scanner.scan(project.path()).await;

    assert!(result.success);
    let analysis = result.analysis.unwrap();
    assert_eq!(analysis.project_type, ProjectType::Go);
    assert_eq!(analysis.language, "go");
    assert_eq!(analysis.framework.as_deref(), Some("gin"));
    assert_eq!(analysis.package_manager.as_deref(), Some("go"));
    assert!(analysis
        .dependencies
        .contains(&"github.com/gin-gonic/gin".to_string()));
    assert!(analysis.entry_points.contains(&PathBuf::from("main.go")));
}

#[tokio::test]
async fn test_scan_rust_project() {
    let project = create_rust_project();
    let scanner = RepositoryScanner::new();

    let result = scanner.scan(project.path()).await;

    assert!(result.success);
    let analysis = result.analysis.unwrap();
    assert_eq!(analysis.project_type, ProjectType::Rust);
    assert_eq!(analysis.package_manager.as_deref(), Some("cargo"));
}

#[tokio::test]
async fn test_scan_unclassified_project_still_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("README.md"), "# docs only\n").unwrap();

    let scanner = RepositoryScanner::new();
    let result = scanner.scan(temp_dir.path()).await;

    assert!(result.success);
    let analysis = result.analysis.unwrap();
    assert_eq!(analysis.project_type, ProjectType::Unknown);
    assert!(analysis.framework.is_none());
    assert!(analysis.dependencies.is_empty());
}

#[tokio::test]
async fn test_scan_missing_path_reports_failure() {
    let scanner = RepositoryScanner::new();
    let result = scanner.scan(std::path::Path::new("/nonexistent/project")).await;

    assert!(!result.success);
    assert!(result.analysis.is_none());
    assert!(result.error.as_deref().unwrap().contains("does not exist"));
}

#[tokio::test]
async fn test_scan_skips_vendored_directories() {
    let project = create_express_project();
    let root = project.path();

    // node_modules must not leak into the analysis
    fs::create_dir_all(root.join("node_modules/express")).unwrap();
    fs::write(
        root.join("node_modules/express/index.js"),
        "module.exports = {};\n",
    )
    .unwrap();

    let scanner = RepositoryScanner::new();
    let result = scanner.scan(root).await;

    assert!(result.success);
    let analysis = result.analysis.unwrap();
    assert!(analysis
        .source_files
        .iter()
        .all(|f| !f.path.starts_with("node_modules")));
}

#[tokio::test]
async fn test_scan_result_serializes_to_json() {
    let project = create_flask_project();
    let scanner = RepositoryScanner::new();

    let result = scanner.scan(project.path()).await;
    let json = serde_json::to_string_pretty(&result).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["analysis"]["project_type"], "python");
    assert_eq!(parsed["analysis"]["framework"], "flask");
}

#[tokio::test]
async fn test_formatted_summary_covers_all_sections() {
    let project = create_flask_project();
    let scanner = RepositoryScanner::new();

    let result = scanner.scan(project.path()).await;
    let summary = format_scan_result(&result);

    assert!(summary.starts_with("✅ **Repository Scan Results**"));
    assert!(summary.contains("**Project Type:** python"));
    assert!(summary.contains("**Framework:** flask"));
    assert!(summary.contains("**Package Manager:** pip"));
    assert!(summary.contains("**Files Scanned:** 3"));
    assert!(summary.contains("**Dependencies (3):**"));
    assert!(summary.contains("**Entry Points:** app.py"));
}

#[tokio::test]
async fn test_formatted_summary_for_failure() {
    let scanner = RepositoryScanner::new();
    let result = scanner.scan(std::path::Path::new("/nonexistent/project")).await;
    let summary = format_scan_result(&result);

    assert!(summary.starts_with("❌ **Repository Scan Failed**"));
    assert!(summary.contains("**Error:**"));
}
