//! Helm CLI wrapper for installing and uninstalling releases.

use crate::process::{run_command_checked, CommandError, CommandOutput};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_INSTALL_TIMEOUT_SECS: u64 = 300;
pub const UNINSTALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Slack on top of helm's own `--timeout` so the process itself can
/// finish reporting before we kill it.
const INSTALL_PROCESS_BUFFER: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct HelmInstallRequest {
    pub chart_path: PathBuf,
    pub release_name: String,
    pub namespace: String,
    pub set_values: Vec<(String, String)>,
    pub wait: bool,
    pub timeout_secs: u64,
}

impl HelmInstallRequest {
    pub fn new(chart_path: PathBuf, release_name: impl Into<String>) -> Self {
        Self {
            chart_path,
            release_name: release_name.into(),
            namespace: "default".to_string(),
            set_values: Vec::new(),
            wait: true,
            timeout_secs: DEFAULT_INSTALL_TIMEOUT_SECS,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_values.push((key.into(), value.into()));
        self
    }

    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

pub struct HelmCli {
    binary: PathBuf,
}

impl Default for HelmCli {
    fn default() -> Self {
        Self::new()
    }
}

impl HelmCli {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("helm"),
        }
    }

    pub fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }

    pub async fn install(
        &self,
        request: &HelmInstallRequest,
    ) -> Result<CommandOutput, CommandError> {
        info!(
            release = %request.release_name,
            namespace = %request.namespace,
            "installing Helm release"
        );

        let args = install_args(request);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let timeout = Duration::from_secs(request.timeout_secs) + INSTALL_PROCESS_BUFFER;
        run_command_checked(&self.binary, &arg_refs, timeout).await
    }

    pub async fn uninstall(
        &self,
        release_name: &str,
        namespace: &str,
    ) -> Result<CommandOutput, CommandError> {
        info!(release = release_name, namespace, "uninstalling Helm release");

        run_command_checked(
            &self.binary,
            &["uninstall", release_name, "--namespace", namespace],
            UNINSTALL_TIMEOUT,
        )
        .await
    }
}

fn install_args(request: &HelmInstallRequest) -> Vec<String> {
    let mut args = vec![
        "install".to_string(),
        request.release_name.clone(),
        request.chart_path.to_string_lossy().into_owned(),
        "--namespace".to_string(),
        request.namespace.clone(),
        "--create-namespace".to_string(),
    ];

    for (key, value) in &request.set_values {
        args.push("--set".to_string());
        args.push(format!("{}={}", key, value));
    }

    if request.wait {
        args.push("--wait".to_string());
        args.push("--timeout".to_string());
        args.push(format!("{}s", request.timeout_secs));
    }

    args
}
