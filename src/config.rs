//! Server configuration
//!
//! Settings load from a `config.yaml` in the working directory when one
//! exists. Without a file, environment variables fill in:
//!
//! - `DRYDOCK_INTERNAL_TOOLS`: expose internal development tools
//!   (true|false) - default: "false"
//! - `DRYDOCK_CLUSTER_PROFILE`: default minikube profile name -
//!   default: "drydock-cluster"
//!
//! A present-but-malformed config file is a startup error, not a silent
//! fallback.
//!
//! # Example config.yaml
//!
//! ```yaml
//! server:
//!   internal_tools: false
//!   transport: stdio
//! tools:
//!   docker:
//!     enabled: true
//!   kubernetes:
//!     enabled: true
//!     default_minikube_profile: drydock-cluster
//!   workflows:
//!     enabled: true
//! ```

use crate::minikube::DEFAULT_PROFILE;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

const INTERNAL_TOOLS_ENV: &str = "DRYDOCK_INTERNAL_TOOLS";
const CLUSTER_PROFILE_ENV: &str = "DRYDOCK_CLUSTER_PROFILE";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid YAML in config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Expose internal development tools over the protocol
    pub internal_tools: bool,

    /// Protocol transport (only "stdio" is supported)
    pub transport: String,

    /// Register the Docker tool group
    pub docker_enabled: bool,

    /// Register the Kubernetes tool group
    pub kubernetes_enabled: bool,

    /// Register the workflow tool group
    pub workflows_enabled: bool,

    /// Minikube profile used when a request does not name one
    pub default_minikube_profile: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            internal_tools: false,
            transport: "stdio".to_string(),
            docker_enabled: true,
            kubernetes_enabled: true,
            workflows_enabled: true,
            default_minikube_profile: DEFAULT_PROFILE.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    server: RawServer,
    tools: RawTools,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawServer {
    internal_tools: Option<bool>,
    transport: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTools {
    docker: RawGroup,
    kubernetes: RawKubernetes,
    workflows: RawGroup,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawGroup {
    enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawKubernetes {
    enabled: Option<bool>,
    default_minikube_profile: Option<String>,
}

impl ServerConfig {
    /// Loads `config.yaml` from the working directory, falling back to
    /// environment variables when the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::from_env());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        // An empty file means "all defaults", same as an empty mapping.
        let raw: RawConfig = if text.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        };

        Ok(Self::from_raw(raw))
    }

    /// Environment-variable fallback used when no config file exists.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.internal_tools = env::var(INTERNAL_TOOLS_ENV)
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        if let Ok(profile) = env::var(CLUSTER_PROFILE_ENV) {
            if !profile.is_empty() {
                config.default_minikube_profile = profile;
            }
        }

        config
    }

    fn from_raw(raw: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            internal_tools: raw
                .server
                .internal_tools
                .unwrap_or(defaults.internal_tools),
            transport: raw.server.transport.unwrap_or(defaults.transport),
            docker_enabled: raw.tools.docker.enabled.unwrap_or(defaults.docker_enabled),
            kubernetes_enabled: raw
                .tools
                .kubernetes
                .enabled
                .unwrap_or(defaults.kubernetes_enabled),
            workflows_enabled: raw
                .tools
                .workflows
                .enabled
                .unwrap_or(defaults.workflows_enabled),
            default_minikube_profile: raw
                .tools
                .kubernetes
                .default_minikube_profile
                .unwrap_or(defaults.default_minikube_profile),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transport != "stdio" {
            return Err(ConfigError::ValidationFailed(format!(
                "Unsupported transport: {}. Only stdio is available",
                self.transport
            )));
        }

        if self.default_minikube_profile.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "default_minikube_profile cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Server Configuration:")?;
        writeln!(f, "  Transport: {}", self.transport)?;
        writeln!(f, "  Internal Tools: {}", self.internal_tools)?;
        writeln!(f, "  Docker Tools: {}", self.docker_enabled)?;
        writeln!(f, "  Kubernetes Tools: {}", self.kubernetes_enabled)?;
        writeln!(f, "  Workflow Tools: {}", self.workflows_enabled)?;
        writeln!(
            f,
            "  Default Minikube Profile: {}",
            self.default_minikube_profile
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    fn test_default_configuration() {
        let config = ServerConfig::default();

        assert!(!config.internal_tools);
        assert_eq!(config.transport, "stdio");
        assert!(config.docker_enabled);
        assert!(config.kubernetes_enabled);
        assert!(config.workflows_enabled);
        assert_eq!(config.default_minikube_profile, DEFAULT_PROFILE);
    }

    #[test]
    #[serial]
    fn test_missing_file_falls_back_to_env() {
        let _guards = vec![
            EnvGuard::set("DRYDOCK_INTERNAL_TOOLS", "true"),
            EnvGuard::set("DRYDOCK_CLUSTER_PROFILE", "dev-cluster"),
        ];

        let config = ServerConfig::load_from(Path::new("/nonexistent/config.yaml")).unwrap();

        assert!(config.internal_tools);
        assert_eq!(config.default_minikube_profile, "dev-cluster");
    }

    #[test]
    #[serial]
    fn test_env_fallback_defaults() {
        let _guards = vec![
            EnvGuard::unset("DRYDOCK_INTERNAL_TOOLS"),
            EnvGuard::unset("DRYDOCK_CLUSTER_PROFILE"),
        ];

        let config = ServerConfig::from_env();

        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_load_full_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(
            &path,
            r#"server:
  internal_tools: true
  transport: stdio
tools:
  docker:
    enabled: false
  kubernetes:
    enabled: true
    default_minikube_profile: staging-cluster
  workflows:
    enabled: false
"#,
        )
        .unwrap();

        let config = ServerConfig::load_from(&path).unwrap();

        assert!(config.internal_tools);
        assert!(!config.docker_enabled);
        assert!(config.kubernetes_enabled);
        assert!(!config.workflows_enabled);
        assert_eq!(config.default_minikube_profile, "staging-cluster");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "tools:\n  docker:\n    enabled: false\n").unwrap();

        let config = ServerConfig::load_from(&path).unwrap();

        assert!(!config.docker_enabled);
        assert!(config.kubernetes_enabled);
        assert!(config.workflows_enabled);
        assert!(!config.internal_tools);
        assert_eq!(config.default_minikube_profile, DEFAULT_PROFILE);
    }

    #[test]
    fn test_empty_config_file_is_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "\n").unwrap();

        let config = ServerConfig::load_from(&path).unwrap();

        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_malformed_config_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "server: [not: a, mapping\n").unwrap();

        let result = ServerConfig::load_from(&path);

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_validate_rejects_unknown_transport() {
        let config = ServerConfig {
            transport: "http".to_string(),
            ..Default::default()
        };

        let result = config.validate();

        assert!(matches!(result, Err(ConfigError::ValidationFailed(_))));
    }

    #[test]
    fn test_validate_rejects_empty_profile() {
        let config = ServerConfig {
            default_minikube_profile: String::new(),
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_display() {
        let config = ServerConfig::default();
        let display = format!("{}", config);

        assert!(display.contains("Server Configuration:"));
        assert!(display.contains("Transport: stdio"));
    }
}
