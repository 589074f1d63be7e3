//! Deployment workflow request and result types.

use crate::minikube::DEFAULT_PROFILE;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Everything a deployment run needs, with conventional defaults for all
/// optional knobs.
#[derive(Debug, Clone)]
pub struct DeploymentWorkflowRequest {
    pub project_path: PathBuf,
    pub app_name: String,
    pub namespace: String,
    pub image_tag: String,
    pub port: u16,
    pub optimize_for_size: bool,
    pub multi_stage: bool,
    pub custom_instructions: Vec<String>,
    pub cluster_profile: String,
}

impl DeploymentWorkflowRequest {
    pub fn new(project_path: PathBuf, app_name: impl Into<String>) -> Self {
        Self {
            project_path,
            app_name: app_name.into(),
            namespace: "default".to_string(),
            image_tag: "latest".to_string(),
            port: 80,
            optimize_for_size: false,
            multi_stage: false,
            custom_instructions: Vec::new(),
            cluster_profile: DEFAULT_PROFILE.to_string(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_image_tag(mut self, image_tag: impl Into<String>) -> Self {
        self.image_tag = image_tag.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_optimize_for_size(mut self, optimize_for_size: bool) -> Self {
        self.optimize_for_size = optimize_for_size;
        self
    }

    pub fn with_multi_stage(mut self, multi_stage: bool) -> Self {
        self.multi_stage = multi_stage;
        self
    }

    pub fn with_custom_instructions(mut self, custom_instructions: Vec<String>) -> Self {
        self.custom_instructions = custom_instructions;
        self
    }

    pub fn with_cluster_profile(mut self, cluster_profile: impl Into<String>) -> Self {
        self.cluster_profile = cluster_profile.into();
        self
    }

    /// The `name:tag` reference the workflow builds, loads and deploys.
    pub fn image_reference(&self) -> String {
        crate::docker::image_reference(&self.app_name, &self.image_tag)
    }
}

/// A failed workflow step. The message becomes the workflow result's
/// error verbatim.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StepError(pub String);

impl StepError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeploymentWorkflowResult {
    pub success: bool,
    pub app_name: String,
    pub namespace: String,
    pub image_tag: String,
    pub steps_completed: Vec<String>,
    pub dockerfile_path: Option<PathBuf>,
    pub chart_path: Option<PathBuf>,
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

impl DeploymentWorkflowResult {
    pub fn completed(request: &DeploymentWorkflowRequest, steps_completed: Vec<String>) -> Self {
        Self {
            success: true,
            app_name: request.app_name.clone(),
            namespace: request.namespace.clone(),
            image_tag: request.image_tag.clone(),
            steps_completed,
            dockerfile_path: Some(request.project_path.join("Dockerfile")),
            chart_path: Some(request.project_path.join("helm").join(&request.app_name)),
            error: None,
            warnings: Vec::new(),
        }
    }

    pub fn failed(
        request: &DeploymentWorkflowRequest,
        steps_completed: Vec<String>,
        error: String,
    ) -> Self {
        Self {
            success: false,
            app_name: request.app_name.clone(),
            namespace: request.namespace.clone(),
            image_tag: request.image_tag.clone(),
            steps_completed,
            dockerfile_path: None,
            chart_path: None,
            error: Some(error),
            warnings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = DeploymentWorkflowRequest::new(PathBuf::from("/proj"), "my-app");

        assert_eq!(request.namespace, "default");
        assert_eq!(request.image_tag, "latest");
        assert_eq!(request.port, 80);
        assert!(!request.optimize_for_size);
        assert!(!request.multi_stage);
        assert!(request.custom_instructions.is_empty());
        assert_eq!(request.cluster_profile, DEFAULT_PROFILE);
    }

    #[test]
    fn test_image_reference() {
        let request =
            DeploymentWorkflowRequest::new(PathBuf::from("/proj"), "my-app").with_image_tag("v2");

        assert_eq!(request.image_reference(), "my-app:v2");
    }

    #[test]
    fn test_completed_result_paths() {
        let request = DeploymentWorkflowRequest::new(PathBuf::from("/proj"), "my-app");
        let result = DeploymentWorkflowResult::completed(&request, vec!["a".to_string()]);

        assert!(result.success);
        assert_eq!(result.dockerfile_path.unwrap(), PathBuf::from("/proj/Dockerfile"));
        assert_eq!(
            result.chart_path.unwrap(),
            PathBuf::from("/proj/helm/my-app")
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_failed_result_carries_error() {
        let request = DeploymentWorkflowRequest::new(PathBuf::from("/proj"), "my-app");
        let result =
            DeploymentWorkflowResult::failed(&request, Vec::new(), "boom".to_string());

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert!(result.dockerfile_path.is_none());
        assert!(result.chart_path.is_none());
    }
}
