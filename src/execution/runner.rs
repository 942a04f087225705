//! Snapshot runner - sequential, fail-fast execution of the fixed step list

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::core::{Step, SNAPSHOT_STEPS};
use crate::execution::launcher::{CommandLauncher, LaunchError};

/// Errors from a snapshot run
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("step `{command}` failed: {source}")]
    Step {
        command: String,
        #[source]
        source: LaunchError,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RunnerError {
    /// Process exit code to surface for this failure. Step failures propagate
    /// the collaborator's own exit code when it has one.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunnerError::Step { source, .. } => source.exit_code(),
            RunnerError::WriteOutput { .. } => 1,
        }
    }
}

/// Result of a run where every step succeeded
#[derive(Debug, Clone)]
pub struct RunReport {
    outputs: Vec<&'static str>,
}

impl RunReport {
    /// Output file names, in step order.
    pub fn output_files(&self) -> &[&'static str] {
        &self.outputs
    }

    /// The summary printed after a fully successful run.
    pub fn summary(&self) -> String {
        let mut out = String::from("Outputs saved:\n");
        for file in &self.outputs {
            out.push_str("  ");
            out.push_str(file);
            out.push('\n');
        }
        out
    }
}

/// Executes the fixed step list strictly in order, stopping at the first
/// failure. The working directory and launcher are supplied explicitly so no
/// step depends on ambient process state.
pub struct SnapshotRunner<L> {
    launcher: L,
    workdir: PathBuf,
}

impl<L: CommandLauncher> SnapshotRunner<L> {
    pub fn new(launcher: L, workdir: impl Into<PathBuf>) -> Self {
        Self {
            launcher,
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Run every step in order. The first failure aborts the run; later
    /// steps are not executed and no summary is produced.
    pub async fn run(&self) -> Result<RunReport, RunnerError> {
        for step in &SNAPSHOT_STEPS {
            self.run_step(step).await?;
        }

        Ok(RunReport {
            outputs: SNAPSHOT_STEPS.iter().map(|s| s.output_file).collect(),
        })
    }

    async fn run_step(&self, step: &Step) -> Result<(), RunnerError> {
        info!("running `{}` -> {}", step.command, step.output_file);

        let stdout = self
            .launcher
            .launch(step.command, &self.workdir)
            .await
            .map_err(|source| RunnerError::Step {
                command: step.command.to_string(),
                source,
            })?;

        // Written only after a clean exit, so a failing collaborator never
        // creates or truncates its artifact.
        let path = self.workdir.join(step.output_file);
        tokio::fs::write(&path, &stdout)
            .await
            .map_err(|source| RunnerError::WriteOutput {
                path: path.clone(),
                source,
            })?;

        debug!("wrote {} bytes to {}", stdout.len(), path.display());
        Ok(())
    }
}

/// Canonical directory containing the running executable, with symlinks
/// resolved so relative paths inside the collaborators behave the same no
/// matter how the binary was invoked.
pub fn default_workdir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?.canonicalize()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "executable has no parent directory",
        )
    })
}
