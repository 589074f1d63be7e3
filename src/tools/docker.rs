//! Docker tool group: Dockerfile generation and image builds.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::analysis::RepositoryScanner;
use crate::docker::{image_reference, DockerCli, DockerfileGenerator, DockerfileOptions};
use crate::process::CommandError;

use super::trait_def::Tool;

const BUILD_LOG_TAIL_CHARS: usize = 1000;

pub struct GenerateDockerfileTool {
    scanner: Arc<RepositoryScanner>,
    generator: Arc<DockerfileGenerator>,
}

impl GenerateDockerfileTool {
    pub fn new(scanner: Arc<RepositoryScanner>, generator: Arc<DockerfileGenerator>) -> Self {
        Self { scanner, generator }
    }
}

#[async_trait]
impl Tool for GenerateDockerfileTool {
    fn name(&self) -> &'static str {
        "generate_dockerfile"
    }

    fn description(&self) -> &'static str {
        "Generate a Dockerfile based on analysis of the project structure and save it"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "project_path": {
                    "type": "string",
                    "description": "Path to the project root directory"
                },
                "output_path": {
                    "type": "string",
                    "description": "Where to save the Dockerfile (defaults to project_path/Dockerfile)"
                },
                "optimize_for_size": {
                    "type": "boolean",
                    "description": "Whether to optimize for smaller image size"
                },
                "multi_stage": {
                    "type": "boolean",
                    "description": "Whether to use multi-stage builds (for supported languages)"
                },
                "custom_instructions": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Custom Dockerfile instructions appended to the generated file"
                }
            },
            "required": ["project_path"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<String> {
        let project_path = arguments["project_path"]
            .as_str()
            .context("Missing required parameter: project_path")?;
        let output_path = arguments["output_path"].as_str().map(PathBuf::from);
        let optimize_for_size = arguments["optimize_for_size"].as_bool().unwrap_or(false);
        let multi_stage = arguments["multi_stage"].as_bool().unwrap_or(false);
        let custom_instructions: Vec<String> = arguments["custom_instructions"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        debug!(project_path, optimize_for_size, multi_stage, "generate_dockerfile invoked");

        let scan = self.scanner.scan(Path::new(project_path)).await;
        let analysis = match scan.analysis {
            Some(analysis) => analysis,
            None => {
                return Ok(format!(
                    "❌ Failed to scan project: {}",
                    scan.error.as_deref().unwrap_or("unknown error")
                ));
            }
        };

        let options = DockerfileOptions {
            optimize_for_size,
            multi_stage,
            custom_instructions,
            ..DockerfileOptions::default()
        };
        let content = self.generator.generate(&analysis, &options).await;

        let mut output = Vec::new();
        output.push("🐳 **Dockerfile Generated**".to_string());
        output.push(format!("📁 **Project:** {}", analysis.root_path.display()));
        output.push(format!("🏷️  **Type:** {}", analysis.project_type));
        output.push(format!("🔌 **Port:** {}", options.port));

        if optimize_for_size || multi_stage || !options.custom_instructions.is_empty() {
            let mut config = Vec::new();
            if optimize_for_size {
                config.push("size-optimized".to_string());
            }
            if multi_stage {
                config.push("multi-stage".to_string());
            }
            if !options.custom_instructions.is_empty() {
                config.push(format!("custom: {}", options.custom_instructions.join(", ")));
            }
            output.push(format!("⚙️  **Options:** {}", config.join(", ")));
        }

        output.push("\n📄 **Dockerfile Content:**".to_string());
        output.push("```dockerfile".to_string());
        output.push(content.trim().to_string());
        output.push("```".to_string());

        let saved = self
            .generator
            .write(&analysis.root_path, &content, output_path.as_deref());
        if saved.success {
            let path = saved.dockerfile_path.unwrap_or_default();
            output.push(format!("\n✅ Dockerfile saved successfully to: {}", path.display()));
        } else {
            output.push(format!(
                "\n❌ {}",
                saved.error.as_deref().unwrap_or("unknown error")
            ));
        }

        Ok(output.join("\n"))
    }
}

pub struct BuildDockerImageTool {
    docker: Arc<DockerCli>,
}

impl BuildDockerImageTool {
    pub fn new(docker: Arc<DockerCli>) -> Self {
        Self { docker }
    }
}

#[async_trait]
impl Tool for BuildDockerImageTool {
    fn name(&self) -> &'static str {
        "build_docker_image"
    }

    fn description(&self) -> &'static str {
        "Build a Docker image from a project directory"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "project_path": {
                    "type": "string",
                    "description": "Path to the project root directory (build context)"
                },
                "image_name": {
                    "type": "string",
                    "description": "Name for the Docker image"
                },
                "image_tag": {
                    "type": "string",
                    "description": "Tag for the Docker image (defaults to 'latest')"
                },
                "dockerfile_path": {
                    "type": "string",
                    "description": "Path to the Dockerfile (defaults to project_path/Dockerfile)"
                }
            },
            "required": ["project_path", "image_name"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<String> {
        let project_path = arguments["project_path"]
            .as_str()
            .context("Missing required parameter: project_path")?;
        let image_name = arguments["image_name"]
            .as_str()
            .context("Missing required parameter: image_name")?;
        let image_tag = arguments["image_tag"].as_str().unwrap_or("latest");

        let project_dir = Path::new(project_path);
        if !project_dir.exists() {
            return Ok(format!("❌ Project directory does not exist: {}", project_path));
        }

        let dockerfile = match arguments["dockerfile_path"].as_str() {
            Some(path) => PathBuf::from(path),
            None => project_dir.join("Dockerfile"),
        };
        if !dockerfile.exists() {
            return Ok(format!("❌ Dockerfile not found: {}", dockerfile.display()));
        }

        let image = image_reference(image_name, image_tag);
        debug!(image = %image, context = %project_dir.display(), "build_docker_image invoked");

        match self.docker.build_image(project_dir, &dockerfile, &image).await {
            Ok(output) => {
                let mut lines = Vec::new();
                lines.push("✅ Docker image built successfully!".to_string());
                lines.push(format!("🏷️  Image: {}", image));
                lines.push(format!("📁 Context: {}", project_dir.display()));
                lines.push(format!("📄 Dockerfile: {}", dockerfile.display()));
                lines.push("\n📋 Build output:".to_string());
                lines.push(tail_chars(&output.stdout, BUILD_LOG_TAIL_CHARS).to_string());
                Ok(lines.join("\n"))
            }
            Err(CommandError::CommandFailed { message, .. }) => {
                Ok(format!("❌ Failed to build Docker image: {}", message))
            }
            Err(CommandError::Timeout { .. }) => {
                Ok("❌ Timeout building Docker image (exceeded 10 minutes)".to_string())
            }
            Err(e) => Ok(format!("❌ Error building Docker image: {}", e)),
        }
    }
}

/// Last `max_chars` characters of `text`, respecting UTF-8 boundaries.
fn tail_chars(text: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return "";
    }
    match text.char_indices().rev().nth(max_chars - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}
