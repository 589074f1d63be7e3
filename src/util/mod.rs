//! Utility modules for drydock
//!
//! This module provides various utility functions and helpers including:
//! - Structured logging setup and configuration

pub mod logging;

// Re-export commonly used items
pub use logging::{init_default, init_from_env, init_logging, LoggingConfig};
