use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tool server for analyzing projects and deploying them to local Kubernetes clusters
#[derive(Parser, Debug)]
#[command(
    name = "drydock",
    about = "Tool server for analyzing projects and deploying them to local Kubernetes clusters",
    version,
    author,
    long_about = "drydock classifies local projects (language, framework, package manager) and \
                  automates the path from source tree to a running minikube deployment: it \
                  generates Dockerfiles and Helm charts, drives docker, minikube and helm, and \
                  exposes every step as a tool over a stdio JSON-RPC server."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Increase verbosity (can be used multiple times)"
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run the stdio tool server",
        long_about = "Serves the tool catalog over JSON-RPC 2.0 on stdin/stdout, one frame per \
                      line. Logs go to stderr so stdout stays protocol-clean.\n\n\
                      Examples:\n  \
                      drydock serve\n  \
                      drydock --log-level debug serve"
    )]
    Serve,

    #[command(
        about = "Scan a project and report what it is",
        long_about = "Walks the project tree and reports language, framework, package manager, \
                      dependencies and entry point.\n\n\
                      Examples:\n  \
                      drydock scan\n  \
                      drydock scan /path/to/project\n  \
                      drydock scan --format json"
    )]
    Scan(ScanArgs),

    #[command(
        about = "Generate a Dockerfile for a project",
        long_about = "Scans the project and writes a Dockerfile matched to its language and \
                      framework. The generated content is also printed to stdout.\n\n\
                      Examples:\n  \
                      drydock dockerfile\n  \
                      drydock dockerfile /path/to/project --port 8080\n  \
                      drydock dockerfile --optimize-size --multi-stage"
    )]
    Dockerfile(DockerfileArgs),

    #[command(
        about = "Generate a Helm chart for a project",
        long_about = "Writes a minimal Helm chart (Chart.yaml, values.yaml, deployment and \
                      service templates) under <path>/helm/<name>.\n\n\
                      Examples:\n  \
                      drydock chart . --name my-app\n  \
                      drydock chart /path/to/project --name my-app --port 8080 --namespace staging"
    )]
    Chart(ChartArgs),

    #[command(
        about = "Build, load and deploy a project to minikube",
        long_about = "Runs the full deployment workflow: generate a Dockerfile, build the image, \
                      load it into minikube, generate a Helm chart and install it.\n\n\
                      Examples:\n  \
                      drydock deploy . --app my-app\n  \
                      drydock deploy /path/to/project --app my-app --namespace staging\n  \
                      drydock deploy . --app my-app --profile dev-cluster --multi-stage"
    )]
    Deploy(DeployArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to project (defaults to current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "text",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct DockerfileArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to project (defaults to current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write the Dockerfile to this path instead of <project>/Dockerfile"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'p',
        long,
        value_name = "PORT",
        default_value = "80",
        help = "Port the application listens on"
    )]
    pub port: u16,

    #[arg(long, help = "Prefer slim base images to reduce image size")]
    pub optimize_size: bool,

    #[arg(long, help = "Use a multi-stage build")]
    pub multi_stage: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ChartArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to project (defaults to current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(short = 'n', long, value_name = "NAME", help = "Chart name")]
    pub name: String,

    #[arg(
        long,
        value_name = "IMAGE",
        help = "Container image name (defaults to the chart name)"
    )]
    pub image: Option<String>,

    #[arg(long, value_name = "TAG", default_value = "latest", help = "Image tag")]
    pub tag: String,

    #[arg(
        short = 'p',
        long,
        value_name = "PORT",
        default_value = "80",
        help = "Port the application listens on"
    )]
    pub port: u16,

    #[arg(
        long,
        value_name = "NAMESPACE",
        default_value = "default",
        help = "Target Kubernetes namespace"
    )]
    pub namespace: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeployArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to project (defaults to current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(short = 'a', long, value_name = "NAME", help = "Application name")]
    pub app: String,

    #[arg(
        long,
        value_name = "NAMESPACE",
        default_value = "default",
        help = "Target Kubernetes namespace"
    )]
    pub namespace: String,

    #[arg(long, value_name = "TAG", default_value = "latest", help = "Image tag")]
    pub tag: String,

    #[arg(
        short = 'p',
        long,
        value_name = "PORT",
        default_value = "80",
        help = "Port the application listens on"
    )]
    pub port: u16,

    #[arg(
        long,
        value_name = "PROFILE",
        help = "Minikube profile to deploy into (defaults to the configured profile)"
    )]
    pub profile: Option<String>,

    #[arg(long, help = "Prefer slim base images to reduce image size")]
    pub optimize_size: bool,

    #[arg(long, help = "Use a multi-stage build")]
    pub multi_stage: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Text,
    Json,
}
