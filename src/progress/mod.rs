//! Progress reporting for deployment workflows

mod handler;
mod logging;

pub use handler::{NoOpHandler, ProgressEvent, ProgressHandler, WorkflowProgress};
pub use logging::LoggingHandler;
