//! Docker CLI wrapper for image builds.

use crate::process::{run_command_checked, CommandError, CommandOutput};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Image builds pull base layers and run package managers, so they get a
/// long leash.
pub const BUILD_TIMEOUT: Duration = Duration::from_secs(600);

pub struct DockerCli {
    binary: PathBuf,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerCli {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("docker"),
        }
    }

    pub fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// Builds `image` from `context` using `dockerfile`.
    ///
    /// Nonzero exit and timeouts surface as [`CommandError`]; the raw
    /// output is returned so callers can render the build log.
    pub async fn build_image(
        &self,
        context: &Path,
        dockerfile: &Path,
        image: &str,
    ) -> Result<CommandOutput, CommandError> {
        info!(image, context = %context.display(), "building Docker image");

        let dockerfile_arg = dockerfile.to_string_lossy();
        let context_arg = context.to_string_lossy();
        run_command_checked(
            &self.binary,
            &[
                "build",
                "-t",
                image,
                "-f",
                dockerfile_arg.as_ref(),
                context_arg.as_ref(),
            ],
            BUILD_TIMEOUT,
        )
        .await
    }
}

/// Formats a `name:tag` image reference.
pub fn image_reference(name: &str, tag: &str) -> String {
    format!("{}:{}", name, tag)
}
