//! Async external-process execution with bounded timeouts.
//!
//! Every external CLI this server drives (docker, minikube, helm, go) goes
//! through [`run_command`]. Output is captured, never streamed to the
//! caller's terminal, and a command that outlives its timeout is reported
//! distinctly from one that exits nonzero.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    #[error("Command timed out after {seconds} seconds: {command}")]
    Timeout { command: String, seconds: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status_code: Option<i32>,
}

impl CommandOutput {
    /// Diagnostic text for failure messages: stderr when present,
    /// stdout otherwise.
    pub fn diagnostic(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Runs a program with captured stdio and a hard timeout.
///
/// A nonzero exit status is not an error at this level; callers that only
/// care about success use [`run_command_checked`].
pub async fn run_command(
    program: &Path,
    args: &[&str],
    timeout: Duration,
) -> Result<CommandOutput, CommandError> {
    let command_line = format!("{} {}", program.display(), args.join(" "));
    debug!(command = %command_line, timeout_secs = timeout.as_secs(), "executing");

    // kill_on_drop reaps the child when the timeout abandons it
    let output = tokio::time::timeout(
        timeout,
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output(),
    )
    .await
    .map_err(|_| CommandError::Timeout {
        command: command_line.clone(),
        seconds: timeout.as_secs(),
    })?
    .map_err(CommandError::Io)?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        status_code: output.status.code(),
    })
}

/// Like [`run_command`] but a nonzero exit becomes `CommandFailed`
/// carrying the command line and its diagnostic output.
pub async fn run_command_checked(
    program: &Path,
    args: &[&str],
    timeout: Duration,
) -> Result<CommandOutput, CommandError> {
    let output = run_command(program, args, timeout).await?;

    if output.status_code != Some(0) {
        return Err(CommandError::CommandFailed {
            command: format!("{} {}", program.display(), args.join(" ")),
            message: output.diagnostic().to_string(),
        });
    }

    Ok(output)
}
