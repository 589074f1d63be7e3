//! drydock - from source tree to a running minikube deployment
//!
//! This library classifies local projects (language, framework, package
//! manager, dependencies, entry point) and automates containerized
//! deployment to a local Kubernetes cluster: it generates Dockerfiles and
//! Helm charts, drives the docker, minikube and helm CLIs, and exposes
//! every capability as a tool over a line-delimited JSON-RPC 2.0 server
//! on stdin/stdout.
//!
//! # Core Concepts
//!
//! - **Scanner**: walks a project tree, parses manifests
//!   (requirements.txt, package.json, go.mod, Cargo.toml, pom.xml, ...)
//!   and produces a [`analysis::ProjectAnalysis`]
//! - **Generators**: turn an analysis into build and deploy artifacts
//!   (Dockerfile, Helm chart) without touching any external process
//! - **Runners**: thin async wrappers over the docker, minikube and helm
//!   binaries with fixed timeouts and typed errors
//! - **Workflow**: the five-step pipeline (generate Dockerfile, build
//!   image, load into minikube, generate chart, helm install) that ties
//!   the above together with fail-fast progress reporting
//! - **Tools**: the protocol-facing catalog; each tool wraps one service
//!   call and renders a human-readable result
//!
//! # Example Usage
//!
//! ```no_run
//! use drydock::analysis::{format_scan_result, RepositoryScanner};
//! use std::path::Path;
//!
//! # async fn example() {
//! let scanner = RepositoryScanner::new();
//! let result = scanner.scan(Path::new("/path/to/project")).await;
//! println!("{}", format_scan_result(&result));
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`analysis`]: project scanning and classification
//! - [`docker`]: Dockerfile generation and image builds
//! - [`helm`]: chart scaffolding and release management
//! - [`minikube`]: cluster lifecycle and image loading
//! - [`workflow`]: the end-to-end deployment pipeline
//! - [`tools`]: the tool catalog served over the protocol
//! - [`server`]: the stdio JSON-RPC transport
//! - [`cli`]: command-line entry points for every capability

// Public modules
pub mod analysis;
pub mod cli;
pub mod config;
pub mod docker;
pub mod helm;
pub mod minikube;
pub mod process;
pub mod progress;
pub mod server;
pub mod tools;
pub mod util;
pub mod workflow;

// Re-export key types for convenient access
pub use analysis::{ProjectAnalysis, ProjectType, RepositoryScanner, ScanResult};
pub use config::{ConfigError, ServerConfig};
pub use process::{CommandError, CommandOutput};
pub use server::StdioServer;
pub use tools::{Tool, ToolRegistry};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};
pub use workflow::{
    DeploymentWorkflowOrchestrator, DeploymentWorkflowRequest, DeploymentWorkflowResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_drydock() {
        assert_eq!(NAME, "drydock");
    }
}
