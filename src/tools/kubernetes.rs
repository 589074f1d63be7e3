//! Kubernetes tool group: minikube cluster lifecycle and Helm charts.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::docker::image_reference;
use crate::helm::{ChartRequest, HelmChartGenerator, HelmCli, HelmInstallRequest};
use crate::minikube::{ClusterSpec, MinikubeCli};
use crate::process::CommandError;

use super::trait_def::Tool;

pub struct CreateMinikubeClusterTool {
    minikube: Arc<MinikubeCli>,
    default_profile: String,
}

impl CreateMinikubeClusterTool {
    pub fn new(minikube: Arc<MinikubeCli>, default_profile: impl Into<String>) -> Self {
        Self {
            minikube,
            default_profile: default_profile.into(),
        }
    }
}

#[async_trait]
impl Tool for CreateMinikubeClusterTool {
    fn name(&self) -> &'static str {
        "create_minikube_cluster"
    }

    fn description(&self) -> &'static str {
        "Create a new minikube cluster for local Kubernetes development"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "profile": {
                    "type": "string",
                    "description": "Name of the minikube profile/cluster (defaults to the configured profile)"
                },
                "cpus": {
                    "type": "integer",
                    "description": "Number of CPUs to allocate",
                    "minimum": 1
                },
                "memory": {
                    "type": "string",
                    "description": "Amount of memory to allocate (e.g. '2048mb')"
                },
                "disk_size": {
                    "type": "string",
                    "description": "Disk size for the cluster (e.g. '20gb')"
                },
                "driver": {
                    "type": "string",
                    "description": "Minikube driver to use (docker, virtualbox, etc.)"
                }
            },
            "required": []
        })
    }

    async fn execute(&self, arguments: Value) -> Result<String> {
        let profile = arguments["profile"].as_str().unwrap_or(&self.default_profile);
        let cpus = arguments["cpus"].as_u64().unwrap_or(2) as u32;
        let memory = arguments["memory"].as_str().unwrap_or("2048mb");
        let disk_size = arguments["disk_size"].as_str().unwrap_or("20gb");
        let driver = arguments["driver"].as_str().unwrap_or("docker");

        debug!(profile, driver, "create_minikube_cluster invoked");

        let spec = ClusterSpec::default()
            .with_profile(profile)
            .with_cpus(cpus)
            .with_memory(memory)
            .with_disk_size(disk_size)
            .with_driver(driver);

        match self.minikube.start_cluster(&spec).await {
            Ok(start) => {
                let mut lines = Vec::new();
                lines.push(format!("✅ Minikube cluster '{}' created successfully!", profile));
                lines.push(format!("🖥️  Driver: {}", driver));
                lines.push(format!("💻 CPUs: {}", cpus));
                lines.push(format!("💾 Memory: {}", memory));
                lines.push(format!("💿 Disk: {}", disk_size));
                match start.profile_switch_warning {
                    None => lines.push(format!(
                        "🔄 Switched to profile '{}' as active cluster",
                        profile
                    )),
                    Some(warning) => lines.push(format!(
                        "⚠️  Warning: Failed to switch to profile '{}': {}",
                        profile, warning
                    )),
                }
                lines.push("\n📋 Cluster details:".to_string());
                lines.push(start.details);
                Ok(lines.join("\n"))
            }
            Err(CommandError::CommandFailed { message, .. }) => Ok(format!(
                "❌ Failed to create minikube cluster '{}': {}",
                profile, message
            )),
            Err(CommandError::Timeout { .. }) => Ok(format!(
                "❌ Timeout creating minikube cluster '{}' (exceeded 5 minutes)",
                profile
            )),
            Err(e) => Ok(format!("❌ Error creating minikube cluster '{}': {}", profile, e)),
        }
    }
}

pub struct DeleteMinikubeClusterTool {
    minikube: Arc<MinikubeCli>,
    default_profile: String,
}

impl DeleteMinikubeClusterTool {
    pub fn new(minikube: Arc<MinikubeCli>, default_profile: impl Into<String>) -> Self {
        Self {
            minikube,
            default_profile: default_profile.into(),
        }
    }
}

#[async_trait]
impl Tool for DeleteMinikubeClusterTool {
    fn name(&self) -> &'static str {
        "delete_minikube_cluster"
    }

    fn description(&self) -> &'static str {
        "Delete a minikube cluster"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "profile": {
                    "type": "string",
                    "description": "Name of the minikube profile/cluster to delete (defaults to the configured profile)"
                },
                "purge": {
                    "type": "boolean",
                    "description": "Whether to purge all cached images and configs"
                }
            },
            "required": []
        })
    }

    async fn execute(&self, arguments: Value) -> Result<String> {
        let profile = arguments["profile"].as_str().unwrap_or(&self.default_profile);
        let purge = arguments["purge"].as_bool().unwrap_or(false);

        debug!(profile, purge, "delete_minikube_cluster invoked");

        match self.minikube.delete_cluster(profile, purge).await {
            Ok(output) => {
                let mut lines = Vec::new();
                lines.push(format!("✅ Minikube cluster '{}' deleted successfully!", profile));
                if purge {
                    lines.push("🗑️  Cached images and configs purged".to_string());
                }
                lines.push("\n📋 Deletion details:".to_string());
                lines.push(output.stdout);
                Ok(lines.join("\n"))
            }
            Err(CommandError::CommandFailed { message, .. }) => Ok(format!(
                "❌ Failed to delete minikube cluster '{}': {}",
                profile, message
            )),
            Err(CommandError::Timeout { .. }) => Ok(format!(
                "❌ Timeout deleting minikube cluster '{}' (exceeded 2 minutes)",
                profile
            )),
            Err(e) => Ok(format!("❌ Error deleting minikube cluster '{}': {}", profile, e)),
        }
    }
}

pub struct GenerateHelmChartTool {
    generator: Arc<HelmChartGenerator>,
}

impl GenerateHelmChartTool {
    pub fn new(generator: Arc<HelmChartGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Tool for GenerateHelmChartTool {
    fn name(&self) -> &'static str {
        "generate_helm_chart"
    }

    fn description(&self) -> &'static str {
        "Generate a Helm chart for a project"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "project_path": {
                    "type": "string",
                    "description": "Path to the project root directory"
                },
                "chart_name": {
                    "type": "string",
                    "description": "Name for the Helm chart"
                },
                "app_version": {
                    "type": "string",
                    "description": "Version of the application (defaults to '1.0.0')"
                },
                "chart_version": {
                    "type": "string",
                    "description": "Version of the Helm chart (defaults to '0.1.0')"
                },
                "image_name": {
                    "type": "string",
                    "description": "Name of the Docker image (defaults to chart_name)"
                },
                "image_tag": {
                    "type": "string",
                    "description": "Tag for the Docker image (defaults to 'latest')"
                },
                "port": {
                    "type": "integer",
                    "description": "Port the application runs on (defaults to 80)"
                },
                "namespace": {
                    "type": "string",
                    "description": "Kubernetes namespace (defaults to 'default')"
                }
            },
            "required": ["project_path", "chart_name"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<String> {
        let project_path = arguments["project_path"]
            .as_str()
            .context("Missing required parameter: project_path")?;
        let chart_name = arguments["chart_name"]
            .as_str()
            .context("Missing required parameter: chart_name")?;
        let app_version = arguments["app_version"].as_str().unwrap_or("1.0.0");
        let chart_version = arguments["chart_version"].as_str().unwrap_or("0.1.0");
        let image_name = arguments["image_name"].as_str().unwrap_or(chart_name);
        let image_tag = arguments["image_tag"].as_str().unwrap_or("latest");
        let port = arguments["port"].as_u64().unwrap_or(80) as u16;
        let namespace = arguments["namespace"].as_str().unwrap_or("default");

        debug!(project_path, chart_name, "generate_helm_chart invoked");

        let request = ChartRequest::new(chart_name)
            .with_app_version(app_version)
            .with_chart_version(chart_version)
            .with_image_name(image_name)
            .with_image_tag(image_tag)
            .with_port(port)
            .with_namespace(namespace);

        let result = self.generator.generate(Path::new(project_path), &request);
        if !result.success {
            return Ok(format!(
                "❌ Failed to generate Helm chart: {}",
                result.error.as_deref().unwrap_or("unknown error")
            ));
        }

        let chart_path = result.chart_path.unwrap_or_default();
        let mut lines = Vec::new();
        lines.push("✅ Helm chart generated successfully!".to_string());
        lines.push(format!("📁 Chart location: {}", chart_path.display()));
        lines.push(format!("📦 Chart name: {}", chart_name));
        lines.push(format!("🏷️  App version: {}", app_version));
        lines.push(format!("🐳 Image: {}", image_reference(image_name, image_tag)));
        lines.push(format!("🔌 Port: {}", port));
        lines.push(format!("📂 Namespace: {}", namespace));
        Ok(lines.join("\n"))
    }
}

pub struct DeployHelmChartTool {
    helm: Arc<HelmCli>,
}

impl DeployHelmChartTool {
    pub fn new(helm: Arc<HelmCli>) -> Self {
        Self { helm }
    }
}

#[async_trait]
impl Tool for DeployHelmChartTool {
    fn name(&self) -> &'static str {
        "deploy_helm_chart"
    }

    fn description(&self) -> &'static str {
        "Deploy a Helm chart to the minikube cluster"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "chart_path": {
                    "type": "string",
                    "description": "Path to the Helm chart directory"
                },
                "release_name": {
                    "type": "string",
                    "description": "Name for the Helm release"
                },
                "namespace": {
                    "type": "string",
                    "description": "Kubernetes namespace to deploy to (defaults to 'default')"
                },
                "wait": {
                    "type": "boolean",
                    "description": "Whether to wait for the deployment to complete (defaults to true)"
                },
                "timeout": {
                    "type": "integer",
                    "description": "Timeout in seconds for the deployment (defaults to 300)"
                },
                "image_tag": {
                    "type": "string",
                    "description": "Optional image tag override passed as image.tag"
                }
            },
            "required": ["chart_path", "release_name"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<String> {
        let chart_path = arguments["chart_path"]
            .as_str()
            .context("Missing required parameter: chart_path")?;
        let release_name = arguments["release_name"]
            .as_str()
            .context("Missing required parameter: release_name")?;
        let namespace = arguments["namespace"].as_str().unwrap_or("default");
        let wait = arguments["wait"].as_bool().unwrap_or(true);
        let timeout = arguments["timeout"].as_u64().unwrap_or(300);

        if !Path::new(chart_path).exists() {
            return Ok(format!(
                "❌ Failed to deploy Helm chart: Chart path does not exist: {}",
                chart_path
            ));
        }

        debug!(chart_path, release_name, namespace, "deploy_helm_chart invoked");

        let mut request = HelmInstallRequest::new(PathBuf::from(chart_path), release_name)
            .with_namespace(namespace)
            .with_wait(wait)
            .with_timeout_secs(timeout);
        if let Some(tag) = arguments["image_tag"].as_str() {
            request = request.with_set("image.tag", tag);
        }

        match self.helm.install(&request).await {
            Ok(_) => {
                let mut lines = Vec::new();
                lines.push("✅ Helm chart deployed successfully!".to_string());
                lines.push(format!("🚀 Release name: {}", release_name));
                lines.push(format!("📂 Namespace: {}", namespace));
                lines.push(format!("📁 Chart path: {}", chart_path));
                Ok(lines.join("\n"))
            }
            Err(CommandError::CommandFailed { message, .. }) => {
                Ok(format!("❌ Failed to deploy Helm chart: {}", message))
            }
            Err(CommandError::Timeout { .. }) => Ok(format!(
                "❌ Failed to deploy Helm chart: Deployment timeout after {} seconds",
                timeout
            )),
            Err(e) => Ok(format!("❌ Error deploying Helm chart: {}", e)),
        }
    }
}

pub struct UninstallHelmChartTool {
    helm: Arc<HelmCli>,
}

impl UninstallHelmChartTool {
    pub fn new(helm: Arc<HelmCli>) -> Self {
        Self { helm }
    }
}

#[async_trait]
impl Tool for UninstallHelmChartTool {
    fn name(&self) -> &'static str {
        "uninstall_helm_chart"
    }

    fn description(&self) -> &'static str {
        "Uninstall a Helm chart release from the minikube cluster"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "release_name": {
                    "type": "string",
                    "description": "Name of the Helm release to uninstall"
                },
                "namespace": {
                    "type": "string",
                    "description": "Kubernetes namespace the release is in (defaults to 'default')"
                }
            },
            "required": ["release_name"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<String> {
        let release_name = arguments["release_name"]
            .as_str()
            .context("Missing required parameter: release_name")?;
        let namespace = arguments["namespace"].as_str().unwrap_or("default");

        debug!(release_name, namespace, "uninstall_helm_chart invoked");

        match self.helm.uninstall(release_name, namespace).await {
            Ok(_) => {
                let mut lines = Vec::new();
                lines.push("✅ Helm chart uninstalled successfully!".to_string());
                lines.push(format!("🗑️  Release name: {}", release_name));
                lines.push(format!("📂 Namespace: {}", namespace));
                Ok(lines.join("\n"))
            }
            Err(CommandError::CommandFailed { message, .. }) => {
                Ok(format!("❌ Failed to uninstall Helm chart: {}", message))
            }
            Err(CommandError::Timeout { .. }) => Ok(
                "❌ Failed to uninstall Helm chart: Uninstall timeout after 120 seconds".to_string(),
            ),
            Err(e) => Ok(format!("❌ Error uninstalling Helm chart: {}", e)),
        }
    }
}
