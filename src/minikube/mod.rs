//! Minikube cluster lifecycle and image loading.

use crate::process::{run_command, run_command_checked, CommandError, CommandOutput};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_PROFILE: &str = "drydock-cluster";

pub const START_TIMEOUT: Duration = Duration::from_secs(300);
pub const PROFILE_SWITCH_TIMEOUT: Duration = Duration::from_secs(30);
pub const DELETE_TIMEOUT: Duration = Duration::from_secs(120);
pub const IMAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Sizing and driver selection for a new cluster.
#[derive(Debug, Clone)]
pub struct ClusterSpec {
    pub profile: String,
    pub cpus: u32,
    pub memory: String,
    pub disk_size: String,
    pub driver: String,
}

impl Default for ClusterSpec {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            cpus: 2,
            memory: "2048mb".to_string(),
            disk_size: "20gb".to_string(),
            driver: "docker".to_string(),
        }
    }
}

impl ClusterSpec {
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn with_cpus(mut self, cpus: u32) -> Self {
        self.cpus = cpus;
        self
    }

    pub fn with_memory(mut self, memory: impl Into<String>) -> Self {
        self.memory = memory.into();
        self
    }

    pub fn with_disk_size(mut self, disk_size: impl Into<String>) -> Self {
        self.disk_size = disk_size.into();
        self
    }

    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = driver.into();
        self
    }
}

/// Outcome of a successful `minikube start`. A failed follow-up profile
/// switch is carried as a warning rather than failing the start.
#[derive(Debug, Clone)]
pub struct ClusterStart {
    pub details: String,
    pub profile_switch_warning: Option<String>,
}

pub struct MinikubeCli {
    binary: PathBuf,
}

impl Default for MinikubeCli {
    fn default() -> Self {
        Self::new()
    }
}

impl MinikubeCli {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("minikube"),
        }
    }

    pub fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// Starts a cluster under `spec.profile` and makes it the active
    /// profile.
    pub async fn start_cluster(&self, spec: &ClusterSpec) -> Result<ClusterStart, CommandError> {
        info!(profile = %spec.profile, driver = %spec.driver, "starting minikube cluster");

        let cpus = spec.cpus.to_string();
        let output = run_command_checked(
            &self.binary,
            &[
                "start",
                "--profile",
                &spec.profile,
                "--cpus",
                &cpus,
                "--memory",
                &spec.memory,
                "--disk-size",
                &spec.disk_size,
                "--driver",
                &spec.driver,
            ],
            START_TIMEOUT,
        )
        .await?;

        let profile_switch_warning = match run_command(
            &self.binary,
            &["profile", &spec.profile],
            PROFILE_SWITCH_TIMEOUT,
        )
        .await
        {
            Ok(switch) if switch.status_code == Some(0) => None,
            Ok(switch) => Some(switch.diagnostic().to_string()),
            Err(e) => Some(e.to_string()),
        };
        if let Some(warning) = &profile_switch_warning {
            warn!(profile = %spec.profile, warning, "failed to switch active profile");
        }

        Ok(ClusterStart {
            details: output.stdout,
            profile_switch_warning,
        })
    }

    pub async fn delete_cluster(
        &self,
        profile: &str,
        purge: bool,
    ) -> Result<CommandOutput, CommandError> {
        info!(profile, purge, "deleting minikube cluster");

        let mut args = vec!["delete", "--profile", profile];
        if purge {
            args.push("--purge");
        }
        run_command_checked(&self.binary, &args, DELETE_TIMEOUT).await
    }

    /// Loads a locally built image into the cluster's container runtime.
    pub async fn load_image(
        &self,
        image: &str,
        profile: &str,
    ) -> Result<CommandOutput, CommandError> {
        info!(image, profile, "loading image into minikube");

        run_command_checked(
            &self.binary,
            &["image", "load", image, "--profile", profile],
            IMAGE_LOAD_TIMEOUT,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_spec_defaults() {
        let spec = ClusterSpec::default();

        assert_eq!(spec.profile, DEFAULT_PROFILE);
        assert_eq!(spec.cpus, 2);
        assert_eq!(spec.memory, "2048mb");
        assert_eq!(spec.disk_size, "20gb");
        assert_eq!(spec.driver, "docker");
    }

    #[test]
    fn test_cluster_spec_builders() {
        let spec = ClusterSpec::default()
            .with_profile("dev")
            .with_cpus(4)
            .with_memory("4096mb");

        assert_eq!(spec.profile, "dev");
        assert_eq!(spec.cpus, 4);
        assert_eq!(spec.memory, "4096mb");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_start_cluster_success_switches_profile() {
        let cli = MinikubeCli::with_binary(PathBuf::from("/bin/true"));
        let start = cli.start_cluster(&ClusterSpec::default()).await.unwrap();

        assert!(start.profile_switch_warning.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_start_cluster_failure() {
        let cli = MinikubeCli::with_binary(PathBuf::from("/bin/false"));
        let result = cli.start_cluster(&ClusterSpec::default()).await;

        assert!(matches!(result, Err(CommandError::CommandFailed { .. })));
    }

    #[tokio::test]
    async fn test_load_image_missing_binary_is_io_error() {
        let cli = MinikubeCli::with_binary(PathBuf::from("/nonexistent/minikube"));
        let result = cli.load_image("app:latest", DEFAULT_PROFILE).await;

        assert!(matches!(result, Err(CommandError::Io(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_delete_cluster_success() {
        let cli = MinikubeCli::with_binary(PathBuf::from("/bin/true"));
        let result = cli.delete_cluster("dev", true).await;

        assert!(result.is_ok());
    }
}
