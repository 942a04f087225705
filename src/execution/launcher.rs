//! Collaborator command launching - spawns a command and captures its stdout

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Errors from launching a collaborator command
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {}", code.map(|c| c.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    NonZeroExit { command: String, code: Option<i32> },
}

impl LaunchError {
    /// Exit code to surface for this failure. A collaborator's own code is
    /// propagated when it exited with one.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::Spawn { .. } => 1,
            LaunchError::NonZeroExit { code, .. } => code.unwrap_or(1),
        }
    }
}

/// Trait for launching collaborator commands - allows tests to substitute
/// scripted outcomes for real processes
#[async_trait]
pub trait CommandLauncher: Send + Sync {
    /// Run `command` with no arguments in `workdir` and return its captured
    /// stdout as raw bytes. Stderr is not captured; it flows through to the
    /// parent process so failures stay visible to the operator.
    async fn launch(&self, command: &str, workdir: &Path) -> Result<Vec<u8>, LaunchError>;
}

/// Launcher that spawns real OS processes
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher;

#[async_trait]
impl CommandLauncher for ProcessLauncher {
    async fn launch(&self, command: &str, workdir: &Path) -> Result<Vec<u8>, LaunchError> {
        debug!("spawning `{}` in {}", command, workdir.display());

        let child = Command::new(command)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| LaunchError::Spawn {
                command: command.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(LaunchError::NonZeroExit {
                command: command.to_string(),
                code: output.status.code(),
            });
        }

        debug!("`{}` produced {} bytes of output", command, output.stdout.len());
        Ok(output.stdout)
    }
}
