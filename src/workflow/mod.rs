//! Minikube deployment workflow.

pub mod orchestrator;
pub mod types;

pub use orchestrator::{DeploymentWorkflowOrchestrator, WORKFLOW_STEPS};
pub use types::{DeploymentWorkflowRequest, DeploymentWorkflowResult, StepError};
