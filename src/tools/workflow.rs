//! End-to-end deployment workflow tool.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::progress::LoggingHandler;
use crate::workflow::{DeploymentWorkflowOrchestrator, DeploymentWorkflowRequest};

use super::trait_def::Tool;

pub struct MinikubeDeploymentWorkflowTool {
    orchestrator: Arc<DeploymentWorkflowOrchestrator>,
    default_profile: String,
}

impl MinikubeDeploymentWorkflowTool {
    pub fn new(
        orchestrator: Arc<DeploymentWorkflowOrchestrator>,
        default_profile: impl Into<String>,
    ) -> Self {
        Self {
            orchestrator,
            default_profile: default_profile.into(),
        }
    }
}

#[async_trait]
impl Tool for MinikubeDeploymentWorkflowTool {
    fn name(&self) -> &'static str {
        "minikube_deployment_workflow"
    }

    fn description(&self) -> &'static str {
        "Execute a complete minikube deployment workflow from project to production"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "project_path": {
                    "type": "string",
                    "description": "Path to the project root directory"
                },
                "app_name": {
                    "type": "string",
                    "description": "Name for the application (used for image, chart, and release names)"
                },
                "namespace": {
                    "type": "string",
                    "description": "Kubernetes namespace to deploy to (defaults to 'default')"
                },
                "image_tag": {
                    "type": "string",
                    "description": "Tag for the Docker image (defaults to 'latest')"
                },
                "port": {
                    "type": "integer",
                    "description": "Port the application runs on (defaults to 80)"
                },
                "optimize_for_size": {
                    "type": "boolean",
                    "description": "Whether to optimize the Dockerfile for smaller image size"
                },
                "multi_stage": {
                    "type": "boolean",
                    "description": "Whether to use multi-stage builds in the Dockerfile"
                },
                "custom_instructions": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Custom Dockerfile instructions appended to the generated file"
                },
                "cluster_profile": {
                    "type": "string",
                    "description": "Minikube cluster profile to deploy into (defaults to the configured profile)"
                }
            },
            "required": ["project_path", "app_name"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<String> {
        let project_path = arguments["project_path"]
            .as_str()
            .context("Missing required parameter: project_path")?;
        let app_name = arguments["app_name"]
            .as_str()
            .context("Missing required parameter: app_name")?;
        let namespace = arguments["namespace"].as_str().unwrap_or("default");
        let image_tag = arguments["image_tag"].as_str().unwrap_or("latest");
        let port = arguments["port"].as_u64().unwrap_or(80) as u16;
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
        let cluster_profile = arguments["cluster_profile"]
            .as_str()
            .unwrap_or(&self.default_profile);

        // Resolve so reported paths do not depend on the caller's working
        // directory; a nonexistent path is reported as given.
        let abs_project_path = std::fs::canonicalize(project_path)
            .unwrap_or_else(|_| PathBuf::from(project_path));

        info!(
            project_path = %abs_project_path.display(),
            app_name,
            "minikube_deployment_workflow invoked"
        );

        let request = DeploymentWorkflowRequest::new(abs_project_path.clone(), app_name)
            .with_namespace(namespace)
            .with_image_tag(image_tag)
            .with_port(port)
            .with_optimize_for_size(optimize_for_size)
            .with_multi_stage(multi_stage)
            .with_custom_instructions(custom_instructions)
            .with_cluster_profile(cluster_profile);

        let (result, _progress) = self
            .orchestrator
            .execute_with_progress(&request, &LoggingHandler)
            .await;

        let mut output = Vec::new();
        if result.success {
            output.push("🚀 **Minikube Deployment Workflow Completed Successfully!**".to_string());
            output.push(format!("📱 **Application:** {}", result.app_name));
            output.push(format!("🏷️  **Image Tag:** {}", result.image_tag));
            output.push(format!("📂 **Namespace:** {}", result.namespace));
            output.push(format!("📁 **Project Path:** {}", abs_project_path.display()));

            if let Some(ref path) = result.dockerfile_path {
                output.push(format!("🐳 **Dockerfile:** {}", path.display()));
            }
            if let Some(ref path) = result.chart_path {
                output.push(format!("⚓ **Helm Chart:** {}", path.display()));
            }

            output.push("\n✅ **Completed Steps:**".to_string());
            for (i, step) in result.steps_completed.iter().enumerate() {
                output.push(format!("   {}. {}", i + 1, step_title(step)));
            }

            output.push("\n🎯 **Your application is now deployed and running in minikube!**".to_string());
            output.push(format!(
                "🔍 **To view your deployment:** `kubectl get pods -n {}`",
                result.namespace
            ));
            output.push(format!(
                "🌐 **To access your app:** `minikube service {} -n {} -p {}`",
                result.app_name, result.namespace, cluster_profile
            ));

            if !result.warnings.is_empty() {
                output.push("\n⚠️  **Warnings:**".to_string());
                for warning in &result.warnings {
                    output.push(format!("   - {}", warning));
                }
            }
        } else {
            output.push("❌ **Minikube Deployment Workflow Failed**".to_string());
            output.push(format!("📱 **Application:** {}", result.app_name));
            output.push(format!("📂 **Namespace:** {}", result.namespace));
            output.push(format!("📁 **Project Path:** {}", abs_project_path.display()));

            if !result.steps_completed.is_empty() {
                output.push("\n✅ **Steps Completed Before Failure:**".to_string());
                for (i, step) in result.steps_completed.iter().enumerate() {
                    output.push(format!("   {}. {}", i + 1, step_title(step)));
                }
            }

            output.push(format!(
                "\n💥 **Error:** {}",
                result.error.as_deref().unwrap_or("unknown error")
            ));
            output.push("\n🔧 **Troubleshooting Tips:**".to_string());
            output.push("   - Ensure minikube is running: `minikube status`".to_string());
            output.push("   - Check Docker is available: `docker --version`".to_string());
            output.push("   - Verify project structure contains necessary files".to_string());
        }

        Ok(output.join("\n"))
    }
}

/// "generate_dockerfile" -> "Generate Dockerfile".
fn step_title(step: &str) -> String {
    step.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
