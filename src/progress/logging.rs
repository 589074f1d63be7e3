//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::WorkflowStarted {
                app_name,
                total_steps,
            } => {
                info!(app = %app_name, total_steps, "Starting deployment workflow");
            }
            ProgressEvent::StepStarted { index, name } => {
                info!(step = index, name, "Starting step");
            }
            ProgressEvent::StepCompleted {
                index,
                name,
                message,
            } => {
                info!(step = index, name, message = %message, "Step complete");
            }
            ProgressEvent::WorkflowCompleted { app_name } => {
                info!(app = %app_name, "Deployment workflow complete");
            }
            ProgressEvent::WorkflowFailed { error } => {
                warn!(error = %error, "Deployment workflow failed");
            }
        }
    }
}
