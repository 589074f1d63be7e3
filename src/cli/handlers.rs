//! Command handlers for the drydock CLI
//!
//! Each handler runs one subcommand end to end and returns a process exit
//! code: 0 for success, 1 for an operation failure. Usage and configuration
//! errors exit with 2 before a handler runs.
//!
//! Results go to stdout; diagnostics and progress go to stderr via `tracing`
//! so output stays pipeable.

use crate::analysis::{format_scan_result, ProjectAnalyzer, RepositoryScanner};
use crate::cli::commands::{ChartArgs, DeployArgs, DockerfileArgs, OutputFormatArg, ScanArgs};
use crate::config::ServerConfig;
use crate::docker::{DockerCli, DockerfileGenerator, DockerfileOptions};
use crate::helm::{ChartRequest, HelmChartGenerator, HelmCli};
use crate::minikube::MinikubeCli;
use crate::progress::LoggingHandler;
use crate::server::StdioServer;
use crate::tools::ToolRegistry;
use crate::workflow::{DeploymentWorkflowOrchestrator, DeploymentWorkflowRequest};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Runs the stdio tool server until the client closes stdin.
pub async fn handle_serve(config: &ServerConfig) -> i32 {
    let registry = ToolRegistry::new(config);
    info!(tools = registry.len(), "serving tool catalog over stdio");

    let server = StdioServer::new(registry);
    match server.run().await {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "server terminated with error");
            1
        }
    }
}

/// Scans a project and prints the classification in the requested format.
pub async fn handle_scan(args: &ScanArgs) -> i32 {
    let path = project_path(args.path.as_deref());
    let scanner = RepositoryScanner::new();
    let result = scanner.scan(&path).await;

    match args.format {
        OutputFormatArg::Text => println!("{}", format_scan_result(&result)),
        OutputFormatArg::Json => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize scan result: {}", e);
                return 1;
            }
        },
    }

    if result.success {
        0
    } else {
        1
    }
}

/// Generates a Dockerfile, writes it next to the project (or to `--output`)
/// and prints the content to stdout.
pub async fn handle_dockerfile(args: &DockerfileArgs) -> i32 {
    let path = project_path(args.path.as_deref());
    let scanner = RepositoryScanner::new();
    let scan = scanner.scan(&path).await;

    let analysis = match scan.analysis {
        Some(analysis) => analysis,
        None => {
            eprintln!(
                "Failed to scan project: {}",
                scan.error.as_deref().unwrap_or("unknown error")
            );
            return 1;
        }
    };

    let options = DockerfileOptions {
        port: args.port,
        optimize_for_size: args.optimize_size,
        multi_stage: args.multi_stage,
        ..DockerfileOptions::default()
    };

    let generator = DockerfileGenerator::new();
    let result = generator
        .generate_and_write(&analysis, &options, args.output.as_deref())
        .await;

    if !result.success {
        eprintln!(
            "{}",
            result.error.as_deref().unwrap_or("Dockerfile generation failed")
        );
        return 1;
    }

    if let Some(content) = &result.content {
        println!("{}", content.trim_end());
    }
    if let Some(dockerfile_path) = &result.dockerfile_path {
        info!(path = %dockerfile_path.display(), "Dockerfile written");
    }
    0
}

/// Generates a Helm chart under `<project>/helm/<name>` and prints the
/// chart directory.
pub async fn handle_chart(args: &ChartArgs) -> i32 {
    let path = project_path(args.path.as_deref());

    let mut request = ChartRequest::new(args.name.as_str())
        .with_image_tag(args.tag.as_str())
        .with_port(args.port)
        .with_namespace(args.namespace.as_str());
    if let Some(image) = &args.image {
        request = request.with_image_name(image.as_str());
    }

    let generator = HelmChartGenerator::new();
    let result = generator.generate(&path, &request);

    if !result.success {
        eprintln!(
            "{}",
            result.error.as_deref().unwrap_or("Chart generation failed")
        );
        return 1;
    }

    if let Some(chart_path) = &result.chart_path {
        println!("{}", chart_path.display());
    }
    0
}

/// Runs the full deployment workflow against the configured minikube
/// profile and prints a summary.
pub async fn handle_deploy(args: &DeployArgs, config: &ServerConfig) -> i32 {
    let path = project_path(args.path.as_deref());
    // Resolve so reported paths do not depend on the caller's working
    // directory; a nonexistent path is reported as given.
    let path = std::fs::canonicalize(&path).unwrap_or(path);

    let profile = args
        .profile
        .clone()
        .unwrap_or_else(|| config.default_minikube_profile.clone());

    let request = DeploymentWorkflowRequest::new(path, args.app.as_str())
        .with_namespace(args.namespace.as_str())
        .with_image_tag(args.tag.as_str())
        .with_port(args.port)
        .with_optimize_for_size(args.optimize_size)
        .with_multi_stage(args.multi_stage)
        .with_cluster_profile(profile);

    let orchestrator = DeploymentWorkflowOrchestrator::new(
        Arc::new(ProjectAnalyzer::new()),
        Arc::new(DockerfileGenerator::new()),
        Arc::new(HelmChartGenerator::new()),
        Arc::new(DockerCli::new()),
        Arc::new(MinikubeCli::new()),
        Arc::new(HelmCli::new()),
    );

    let (result, _progress) = orchestrator
        .execute_with_progress(&request, &LoggingHandler)
        .await;

    if result.success {
        println!(
            "Deployed {} to namespace '{}'",
            request.image_reference(),
            result.namespace
        );
        println!("Completed steps: {}", result.steps_completed.join(", "));
        if let Some(chart_path) = &result.chart_path {
            println!("Chart: {}", chart_path.display());
        }
        0
    } else {
        if !result.steps_completed.is_empty() {
            eprintln!(
                "Completed before failure: {}",
                result.steps_completed.join(", ")
            );
        }
        eprintln!(
            "Deployment failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
        1
    }
}

fn project_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn python_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("requirements.txt"),
            "flask==3.0.0\ngunicorn==21.2.0\n",
        )
        .unwrap();
        fs::write(dir.path().join("app.py"), "app = Flask(__name__)\n").unwrap();
        dir
    }

    #[test]
    fn test_project_path_defaults_to_current_dir() {
        assert_eq!(project_path(None), PathBuf::from("."));
        assert_eq!(
            project_path(Some(Path::new("/tmp/project"))),
            PathBuf::from("/tmp/project")
        );
    }

    #[tokio::test]
    async fn test_handle_scan_success() {
        let dir = python_project();
        let args = ScanArgs {
            path: Some(dir.path().to_path_buf()),
            format: OutputFormatArg::Text,
        };

        assert_eq!(handle_scan(&args).await, 0);
    }

    #[tokio::test]
    async fn test_handle_scan_json_format() {
        let dir = python_project();
        let args = ScanArgs {
            path: Some(dir.path().to_path_buf()),
            format: OutputFormatArg::Json,
        };

        assert_eq!(handle_scan(&args).await, 0);
    }

    #[tokio::test]
    async fn test_handle_scan_missing_path() {
        let args = ScanArgs {
            path: Some(PathBuf::from("/nonexistent/project")),
            format: OutputFormatArg::Text,
        };

        assert_eq!(handle_scan(&args).await, 1);
    }

    #[tokio::test]
    async fn test_handle_dockerfile_writes_file() {
        let dir = python_project();
        let args = DockerfileArgs {
            path: Some(dir.path().to_path_buf()),
            output: None,
            port: 8080,
            optimize_size: false,
            multi_stage: false,
        };

        assert_eq!(handle_dockerfile(&args).await, 0);

        let content = fs::read_to_string(dir.path().join("Dockerfile")).unwrap();
        assert!(content.contains("EXPOSE 8080"));
    }

    #[tokio::test]
    async fn test_handle_dockerfile_honors_output_path() {
        let dir = python_project();
        let output = dir.path().join("Dockerfile.generated");
        let args = DockerfileArgs {
            path: Some(dir.path().to_path_buf()),
            output: Some(output.clone()),
            port: 80,
            optimize_size: false,
            multi_stage: false,
        };

        assert_eq!(handle_dockerfile(&args).await, 0);
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_handle_dockerfile_missing_project() {
        let args = DockerfileArgs {
            path: Some(PathBuf::from("/nonexistent/project")),
            output: None,
            port: 80,
            optimize_size: false,
            multi_stage: false,
        };

        assert_eq!(handle_dockerfile(&args).await, 1);
    }

    #[tokio::test]
    async fn test_handle_chart_writes_chart() {
        let dir = python_project();
        let args = ChartArgs {
            path: Some(dir.path().to_path_buf()),
            name: "my-app".to_string(),
            image: None,
            tag: "v1".to_string(),
            port: 3000,
            namespace: "staging".to_string(),
        };

        assert_eq!(handle_chart(&args).await, 0);

        let chart_dir = dir.path().join("helm").join("my-app");
        assert!(chart_dir.join("Chart.yaml").exists());
        assert!(chart_dir.join("values.yaml").exists());
    }

    #[tokio::test]
    async fn test_handle_chart_missing_project() {
        let args = ChartArgs {
            path: Some(PathBuf::from("/nonexistent/project")),
            name: "my-app".to_string(),
            image: None,
            tag: "latest".to_string(),
            port: 80,
            namespace: "default".to_string(),
        };

        assert_eq!(handle_chart(&args).await, 1);
    }

    #[tokio::test]
    async fn test_handle_deploy_missing_project() {
        let args = DeployArgs {
            path: Some(PathBuf::from("/nonexistent/project")),
            app: "my-app".to_string(),
            namespace: "default".to_string(),
            tag: "latest".to_string(),
            port: 80,
            profile: None,
            optimize_size: false,
            multi_stage: false,
        };
        let config = ServerConfig::default();

        assert_eq!(handle_deploy(&args, &config).await, 1);
    }
}
