//! Test utility functions for reposnap

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use reposnap::execution::{CommandLauncher, LaunchError};
use reposnap::report::{GitOutput, GitRunner, ReportError};

/// Scripted outcome for one collaborator command
#[derive(Debug, Clone)]
pub enum StubOutcome {
    Succeed(Vec<u8>),
    Fail(i32),
}

/// Launcher that replays scripted outcomes and records every call
pub struct StubLauncher {
    outcomes: HashMap<String, StubOutcome>,
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl StubLauncher {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn succeed(mut self, command: &str, stdout: &str) -> Self {
        self.outcomes.insert(
            command.to_string(),
            StubOutcome::Succeed(stdout.as_bytes().to_vec()),
        );
        self
    }

    pub fn fail(mut self, command: &str, code: i32) -> Self {
        self.outcomes
            .insert(command.to_string(), StubOutcome::Fail(code));
        self
    }

    /// Commands launched so far, with their working directories, in order.
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }

    /// Command names launched so far, in order.
    pub fn launched_commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|(command, _)| command).collect()
    }
}

#[async_trait]
impl CommandLauncher for StubLauncher {
    async fn launch(&self, command: &str, workdir: &Path) -> Result<Vec<u8>, LaunchError> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), workdir.to_path_buf()));

        match self.outcomes.get(command) {
            Some(StubOutcome::Succeed(stdout)) => Ok(stdout.clone()),
            Some(StubOutcome::Fail(code)) => Err(LaunchError::NonZeroExit {
                command: command.to_string(),
                code: Some(*code),
            }),
            None => Err(LaunchError::Spawn {
                command: command.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no stub registered"),
            }),
        }
    }
}

/// Git runner replaying canned output, keyed by directory name and arguments.
/// Unscripted invocations report failure, the same shape a broken repo gives.
pub struct ScriptedGit {
    responses: HashMap<(String, String), GitOutput>,
}

impl ScriptedGit {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    pub fn ok(self, dir_name: &str, args: &[&str], stdout: &str) -> Self {
        self.on(
            dir_name,
            args,
            GitOutput {
                success: true,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        )
    }

    pub fn err(self, dir_name: &str, args: &[&str], stderr: &str) -> Self {
        self.on(
            dir_name,
            args,
            GitOutput {
                success: false,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        )
    }

    /// Mark a directory as a git work tree.
    pub fn repo(self, dir_name: &str) -> Self {
        self.ok(dir_name, &["rev-parse", "--is-inside-work-tree"], "true\n")
    }

    fn on(mut self, dir_name: &str, args: &[&str], output: GitOutput) -> Self {
        self.responses
            .insert((dir_name.to_string(), args.join(" ")), output);
        self
    }
}

#[async_trait]
impl GitRunner for ScriptedGit {
    async fn git(&self, dir: &Path, args: &[&str]) -> Result<GitOutput, ReportError> {
        let dir_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(self
            .responses
            .get(&(dir_name, args.join(" ")))
            .cloned()
            .unwrap_or(GitOutput {
                success: false,
                stdout: String::new(),
                stderr: String::new(),
            }))
    }
}

/// Scratch directory serving as a runner workspace or report parent.
pub fn scratch_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create scratch dir")
}

/// Read an output artifact from a workspace.
pub fn read_output(dir: &Path, file: &str) -> Vec<u8> {
    std::fs::read(dir.join(file)).unwrap_or_else(|e| panic!("failed to read {}: {}", file, e))
}

/// Assert an output artifact was not created.
pub fn assert_no_output(dir: &Path, file: &str) {
    assert!(
        !dir.join(file).exists(),
        "{} should not exist in {}",
        file,
        dir.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_launcher_replays_and_records() {
        let launcher = StubLauncher::new().succeed("lister", "out\n");
        let dir = scratch_dir();

        let stdout = launcher.launch("lister", dir.path()).await.unwrap();
        assert_eq!(stdout, b"out\n");
        assert_eq!(launcher.launched_commands(), vec!["lister".to_string()]);
    }

    #[tokio::test]
    async fn test_stub_launcher_unregistered_command_fails_to_spawn() {
        let launcher = StubLauncher::new();
        let dir = scratch_dir();

        let result = launcher.launch("missing", dir.path()).await;
        assert!(matches!(result, Err(LaunchError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_scripted_git_defaults_to_failure() {
        let git = ScriptedGit::new().repo("repoA");
        let dir = scratch_dir();

        let out = git
            .git(&dir.path().join("repoA"), &["rev-parse", "--is-inside-work-tree"])
            .await
            .unwrap();
        assert!(out.success);

        let out = git
            .git(&dir.path().join("other"), &["rev-parse", "--is-inside-work-tree"])
            .await
            .unwrap();
        assert!(!out.success);
    }
}
