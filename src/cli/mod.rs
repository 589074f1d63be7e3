pub mod commands;
pub mod handlers;

pub use commands::{
    ChartArgs, CliArgs, Commands, DeployArgs, DockerfileArgs, OutputFormatArg, ScanArgs,
};
pub use handlers::{handle_chart, handle_deploy, handle_dockerfile, handle_scan, handle_serve};
