//! Progress handler trait and events

use serde::Serialize;

/// Events emitted while a deployment workflow runs. Step indexes are
/// 1-based.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Workflow started
    WorkflowStarted { app_name: String, total_steps: usize },

    /// A step began executing
    StepStarted { index: usize, name: &'static str },

    /// A step finished successfully
    StepCompleted {
        index: usize,
        name: &'static str,
        message: String,
    },

    /// Every step finished
    WorkflowCompleted { app_name: String },

    /// The workflow stopped early
    WorkflowFailed { error: String },
}

/// Trait for observing workflow progress events
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {
        // Intentionally empty
    }
}

/// Point-in-time view of how far a single workflow invocation has
/// progressed. Built per call, so concurrent invocations never share
/// counters.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowProgress {
    pub current_step: usize,
    pub total_steps: usize,
    pub percentage: f64,
    pub completed_steps: Vec<String>,
}

impl WorkflowProgress {
    pub fn new(total_steps: usize) -> Self {
        Self {
            current_step: 0,
            total_steps,
            percentage: 0.0,
            completed_steps: Vec::new(),
        }
    }

    /// Records a finished step and its outcome message.
    pub fn record_step(&mut self, message: String) {
        self.current_step += 1;
        self.percentage = (self.current_step as f64 / self.total_steps as f64) * 100.0;
        self.completed_steps.push(message);
    }
}
