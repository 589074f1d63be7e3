//! Repository scanning tool.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::analysis::{format_scan_result, RepositoryScanner};

use super::trait_def::Tool;

pub struct ScanRepositoryTool {
    scanner: Arc<RepositoryScanner>,
}

impl ScanRepositoryTool {
    pub fn new(scanner: Arc<RepositoryScanner>) -> Self {
        Self { scanner }
    }
}

#[async_trait]
impl Tool for ScanRepositoryTool {
    fn name(&self) -> &'static str {
        "scan_repository"
    }

    fn description(&self) -> &'static str {
        "Scan a repository to analyze its structure, dependencies, and project type"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the repository root directory"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<String> {
        let path = arguments["path"].as_str().unwrap_or(".");

        debug!(path, "scan_repository invoked");

        let result = self.scanner.scan(Path::new(path)).await;
        Ok(format_scan_result(&result))
    }
}
