//! Internal development tools, registered only when enabled in config.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use super::trait_def::Tool;

const MAX_LISTED_ITEMS: usize = 20;

pub struct GetCurrentDirectoryTool;

#[async_trait]
impl Tool for GetCurrentDirectoryTool {
    fn name(&self) -> &'static str {
        "get_current_directory"
    }

    fn description(&self) -> &'static str {
        "Get the current working directory to help identify project paths"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _arguments: Value) -> Result<String> {
        let current_dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => return Ok(format!("❌ Error getting current directory: {}", e)),
        };

        let mut contents = match std::fs::read_dir(&current_dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if entry.path().is_dir() {
                        format!("📁 {}/", name)
                    } else {
                        format!("📄 {}", name)
                    }
                })
                .collect::<Vec<_>>(),
            Err(_) => vec!["❌ Permission denied reading directory contents".to_string()],
        };
        contents.sort();

        let mut output = Vec::new();
        output.push("📍 **Current Working Directory**".to_string());
        output.push(format!("🗂️ **Path:** {}", current_dir.display()));
        output.push(format!("📊 **Items Found:** {}", contents.len()));
        output.push("\n📋 **Directory Contents:**".to_string());
        output.push("=".repeat(40));

        for item in contents.iter().take(MAX_LISTED_ITEMS) {
            output.push(item.clone());
        }
        if contents.len() > MAX_LISTED_ITEMS {
            output.push(format!(
                "... and {} more items",
                contents.len() - MAX_LISTED_ITEMS
            ));
        }

        output.push("=".repeat(40));
        output.push("\n💡 **Usage Tip:**".to_string());
        output.push("Use this path or navigate to a subdirectory for Docker operations.".to_string());
        output.push("For example: `generate_dockerfile('/path/to/your/project')`".to_string());

        Ok(output.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reports_working_directory() {
        let text = GetCurrentDirectoryTool.execute(json!({})).await.unwrap();

        assert!(text.starts_with("📍 **Current Working Directory**"));
        assert!(text.contains("🗂️ **Path:**"));
        assert!(text.contains("📊 **Items Found:**"));
        assert!(text.contains(&"=".repeat(40)));
        assert!(text.contains("💡 **Usage Tip:**"));
    }

    #[test]
    fn test_schema_has_no_parameters() {
        let schema = GetCurrentDirectoryTool.schema();
        assert!(schema["properties"].as_object().unwrap().is_empty());
    }
}
