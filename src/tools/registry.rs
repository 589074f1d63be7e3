//! Tool registry
//!
//! Maintains the set of tools exposed over the protocol, assembled from
//! shared services according to the server configuration.

use std::sync::Arc;

use crate::analysis::{ProjectAnalyzer, RepositoryScanner};
use crate::config::ServerConfig;
use crate::docker::{DockerCli, DockerfileGenerator};
use crate::helm::{HelmChartGenerator, HelmCli};
use crate::minikube::MinikubeCli;
use crate::workflow::DeploymentWorkflowOrchestrator;

use super::docker::{BuildDockerImageTool, GenerateDockerfileTool};
use super::internal::GetCurrentDirectoryTool;
use super::kubernetes::{
    CreateMinikubeClusterTool, DeleteMinikubeClusterTool, DeployHelmChartTool,
    GenerateHelmChartTool, UninstallHelmChartTool,
};
use super::repository::ScanRepositoryTool;
use super::trait_def::Tool;
use super::workflow::MinikubeDeploymentWorkflowTool;

/// Registry of all tools visible to clients.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a registry with default service wiring.
    pub fn new(config: &ServerConfig) -> Self {
        let scanner = Arc::new(RepositoryScanner::new());
        let dockerfile_generator = Arc::new(DockerfileGenerator::new());
        let chart_generator = Arc::new(HelmChartGenerator::new());
        let docker = Arc::new(DockerCli::new());
        let minikube = Arc::new(MinikubeCli::new());
        let helm = Arc::new(HelmCli::new());
        let orchestrator = Arc::new(DeploymentWorkflowOrchestrator::new(
            Arc::new(ProjectAnalyzer::new()),
            Arc::clone(&dockerfile_generator),
            Arc::clone(&chart_generator),
            Arc::clone(&docker),
            Arc::clone(&minikube),
            Arc::clone(&helm),
        ));

        Self::with_services(
            config,
            scanner,
            dockerfile_generator,
            chart_generator,
            docker,
            minikube,
            helm,
            orchestrator,
        )
    }

    /// Create a registry from externally constructed services. Registration
    /// order is stable so `tools/list` output is deterministic.
    #[allow(clippy::too_many_arguments)]
    pub fn with_services(
        config: &ServerConfig,
        scanner: Arc<RepositoryScanner>,
        dockerfile_generator: Arc<DockerfileGenerator>,
        chart_generator: Arc<HelmChartGenerator>,
        docker: Arc<DockerCli>,
        minikube: Arc<MinikubeCli>,
        helm: Arc<HelmCli>,
        orchestrator: Arc<DeploymentWorkflowOrchestrator>,
    ) -> Self {
        let profile = config.default_minikube_profile.clone();
        let mut tools: Vec<Arc<dyn Tool>> = Vec::new();

        tools.push(Arc::new(ScanRepositoryTool::new(Arc::clone(&scanner))));

        if config.docker_enabled {
            tools.push(Arc::new(GenerateDockerfileTool::new(
                Arc::clone(&scanner),
                Arc::clone(&dockerfile_generator),
            )));
            tools.push(Arc::new(BuildDockerImageTool::new(Arc::clone(&docker))));
        }

        if config.kubernetes_enabled {
            tools.push(Arc::new(CreateMinikubeClusterTool::new(
                Arc::clone(&minikube),
                profile.clone(),
            )));
            tools.push(Arc::new(DeleteMinikubeClusterTool::new(
                Arc::clone(&minikube),
                profile.clone(),
            )));
            tools.push(Arc::new(GenerateHelmChartTool::new(Arc::clone(
                &chart_generator,
            ))));
            tools.push(Arc::new(DeployHelmChartTool::new(Arc::clone(&helm))));
            tools.push(Arc::new(UninstallHelmChartTool::new(Arc::clone(&helm))));
        }

        if config.workflows_enabled {
            tools.push(Arc::new(MinikubeDeploymentWorkflowTool::new(
                Arc::clone(&orchestrator),
                profile,
            )));
        }

        if config.internal_tools {
            tools.push(Arc::new(GetCurrentDirectoryTool));
        }

        Self { tools }
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// Get all registered tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// All registered tools, in registration order
    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
