//! Five-step minikube deployment orchestration.
//!
//! Steps run sequentially and fail fast: generate a Dockerfile, build the
//! image, load it into minikube, scaffold a Helm chart, install the
//! release. The orchestrator owns no mutable state; progress lives in a
//! per-invocation [`WorkflowProgress`] and is surfaced through an optional
//! [`ProgressHandler`].

use super::types::{DeploymentWorkflowRequest, DeploymentWorkflowResult, StepError};
use crate::analysis::ProjectAnalyzer;
use crate::docker::{DockerCli, DockerfileGenerator, DockerfileOptions};
use crate::helm::{ChartRequest, HelmChartGenerator, HelmCli, HelmInstallRequest};
use crate::minikube::MinikubeCli;
use crate::process::CommandError;
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler, WorkflowProgress};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Step names in execution order, as reported in `steps_completed`.
pub const WORKFLOW_STEPS: [&str; 5] = [
    "generate_dockerfile",
    "build_docker_image",
    "load_image_to_minikube",
    "generate_helm_chart",
    "deploy_helm_chart",
];

pub struct DeploymentWorkflowOrchestrator {
    analyzer: Arc<ProjectAnalyzer>,
    dockerfile_generator: Arc<DockerfileGenerator>,
    chart_generator: Arc<HelmChartGenerator>,
    docker: Arc<DockerCli>,
    minikube: Arc<MinikubeCli>,
    helm: Arc<HelmCli>,
}

impl DeploymentWorkflowOrchestrator {
    pub fn new(
        analyzer: Arc<ProjectAnalyzer>,
        dockerfile_generator: Arc<DockerfileGenerator>,
        chart_generator: Arc<HelmChartGenerator>,
        docker: Arc<DockerCli>,
        minikube: Arc<MinikubeCli>,
        helm: Arc<HelmCli>,
    ) -> Self {
        Self {
            analyzer,
            dockerfile_generator,
            chart_generator,
            docker,
            minikube,
            helm,
        }
    }

    pub async fn execute(
        &self,
        request: &DeploymentWorkflowRequest,
    ) -> (DeploymentWorkflowResult, WorkflowProgress) {
        self.execute_with_progress(request, &NoOpHandler).await
    }

    /// Runs the workflow, reporting each step to `handler`. Returns the
    /// result together with the final progress snapshot.
    pub async fn execute_with_progress(
        &self,
        request: &DeploymentWorkflowRequest,
        handler: &dyn ProgressHandler,
    ) -> (DeploymentWorkflowResult, WorkflowProgress) {
        let mut progress = WorkflowProgress::new(WORKFLOW_STEPS.len());

        if !request.project_path.exists() {
            let error = format!(
                "Project path does not exist: {}",
                request.project_path.display()
            );
            handler.on_progress(&ProgressEvent::WorkflowFailed {
                error: error.clone(),
            });
            return (
                DeploymentWorkflowResult::failed(request, Vec::new(), error),
                progress,
            );
        }

        info!(app = %request.app_name, project = %request.project_path.display(), "starting deployment workflow");
        handler.on_progress(&ProgressEvent::WorkflowStarted {
            app_name: request.app_name.clone(),
            total_steps: WORKFLOW_STEPS.len(),
        });

        let mut steps_completed: Vec<String> = Vec::new();

        if let Err(error) = self
            .run_step(
                1,
                &mut progress,
                handler,
                &mut steps_completed,
                self.generate_dockerfile(request),
            )
            .await
        {
            return (
                DeploymentWorkflowResult::failed(request, steps_completed, error),
                progress,
            );
        }

        if let Err(error) = self
            .run_step(
                2,
                &mut progress,
                handler,
                &mut steps_completed,
                self.build_docker_image(request),
            )
            .await
        {
            return (
                DeploymentWorkflowResult::failed(request, steps_completed, error),
                progress,
            );
        }

        if let Err(error) = self
            .run_step(
                3,
                &mut progress,
                handler,
                &mut steps_completed,
                self.load_image_to_minikube(request),
            )
            .await
        {
            return (
                DeploymentWorkflowResult::failed(request, steps_completed, error),
                progress,
            );
        }

        if let Err(error) = self
            .run_step(
                4,
                &mut progress,
                handler,
                &mut steps_completed,
                self.generate_helm_chart(request),
            )
            .await
        {
            return (
                DeploymentWorkflowResult::failed(request, steps_completed, error),
                progress,
            );
        }

        if let Err(error) = self
            .run_step(
                5,
                &mut progress,
                handler,
                &mut steps_completed,
                self.deploy_helm_chart(request),
            )
            .await
        {
            return (
                DeploymentWorkflowResult::failed(request, steps_completed, error),
                progress,
            );
        }

        handler.on_progress(&ProgressEvent::WorkflowCompleted {
            app_name: request.app_name.clone(),
        });
        (
            DeploymentWorkflowResult::completed(request, steps_completed),
            progress,
        )
    }

    /// Drives one step: emits start/complete events, records progress on
    /// success, and converts a step failure into the workflow error string.
    async fn run_step<F>(
        &self,
        index: usize,
        progress: &mut WorkflowProgress,
        handler: &dyn ProgressHandler,
        steps_completed: &mut Vec<String>,
        step: F,
    ) -> Result<(), String>
    where
        F: Future<Output = Result<String, StepError>>,
    {
        let name = WORKFLOW_STEPS[index - 1];
        handler.on_progress(&ProgressEvent::StepStarted { index, name });

        match step.await {
            Ok(message) => {
                info!(step = name, "workflow step succeeded");
                handler.on_progress(&ProgressEvent::StepCompleted {
                    index,
                    name,
                    message: message.clone(),
                });
                progress.record_step(message);
                steps_completed.push(name.to_string());
                Ok(())
            }
            Err(e) => {
                let error = e.to_string();
                handler.on_progress(&ProgressEvent::WorkflowFailed {
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    async fn generate_dockerfile(
        &self,
        request: &DeploymentWorkflowRequest,
    ) -> Result<String, StepError> {
        let analysis = self
            .analyzer
            .analyze(&request.project_path)
            .await
            .map_err(|e| StepError::new(format!("Failed to generate Dockerfile: {}", e)))?;

        let options = DockerfileOptions {
            port: request.port,
            optimize_for_size: request.optimize_for_size,
            multi_stage: request.multi_stage,
            custom_instructions: request.custom_instructions.clone(),
        };
        let content = self.dockerfile_generator.generate(&analysis, &options).await;
        let written = self
            .dockerfile_generator
            .write(&request.project_path, &content, None);
        if !written.success {
            return Err(StepError::new(written.error.unwrap_or_else(|| {
                "Failed to save Dockerfile".to_string()
            })));
        }

        Ok(format!(
            "Dockerfile generated successfully for {} project",
            analysis.project_type
        ))
    }

    async fn build_docker_image(
        &self,
        request: &DeploymentWorkflowRequest,
    ) -> Result<String, StepError> {
        let dockerfile_path = request.project_path.join("Dockerfile");
        if !dockerfile_path.exists() {
            return Err(StepError::new(format!(
                "Dockerfile not found: {}",
                dockerfile_path.display()
            )));
        }

        let image = request.image_reference();
        self.docker
            .build_image(&request.project_path, &dockerfile_path, &image)
            .await
            .map_err(|e| step_failure("Failed to build Docker image", e))?;

        Ok(format!("Docker image built successfully: {}", image))
    }

    async fn load_image_to_minikube(
        &self,
        request: &DeploymentWorkflowRequest,
    ) -> Result<String, StepError> {
        let image = request.image_reference();
        self.minikube
            .load_image(&image, &request.cluster_profile)
            .await
            .map_err(|e| {
                step_failure(
                    &format!(
                        "Failed to load image '{}' into cluster '{}'",
                        image, request.cluster_profile
                    ),
                    e,
                )
            })?;

        Ok(format!(
            "Image '{}' loaded successfully into cluster '{}'",
            image, request.cluster_profile
        ))
    }

    async fn generate_helm_chart(
        &self,
        request: &DeploymentWorkflowRequest,
    ) -> Result<String, StepError> {
        let chart_request = ChartRequest::new(&request.app_name)
            .with_image_tag(&request.image_tag)
            .with_port(request.port)
            .with_namespace(&request.namespace);

        let result = self
            .chart_generator
            .generate(&request.project_path, &chart_request);
        if !result.success {
            return Err(StepError::new(format!(
                "Failed to generate Helm chart: {}",
                result.error.unwrap_or_else(|| "unknown error".to_string())
            )));
        }

        let chart_path = result
            .chart_path
            .unwrap_or_else(|| request.project_path.join("helm").join(&request.app_name));
        Ok(format!(
            "Helm chart generated successfully: {}",
            chart_path.display()
        ))
    }

    async fn deploy_helm_chart(
        &self,
        request: &DeploymentWorkflowRequest,
    ) -> Result<String, StepError> {
        let chart_path = request.project_path.join("helm").join(&request.app_name);
        let install = HelmInstallRequest::new(chart_path, &request.app_name)
            .with_namespace(&request.namespace)
            .with_set("image.tag", &request.image_tag);

        self.helm
            .install(&install)
            .await
            .map_err(|e| step_failure("Failed to deploy Helm chart", e))?;

        Ok(format!(
            "Helm chart deployed successfully: {}",
            request.app_name
        ))
    }
}

/// Failure text for a step: command failures keep only their diagnostic
/// output, timeouts and I/O errors keep the full error rendering.
fn step_failure(prefix: &str, error: CommandError) -> StepError {
    match error {
        CommandError::CommandFailed { message, .. } => {
            StepError::new(format!("{}: {}", prefix, message))
        }
        other => StepError::new(format!("{}: {}", prefix, other)),
    }
}
