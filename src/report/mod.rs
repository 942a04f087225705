//! Sibling-repository reports
//!
//! These are the built-in renditions of the three collaborator programs the
//! snapshot runner captures: sibling remotes, ignored files, and uncommitted
//! changes. Each report scans the immediate children of a parent directory
//! and inspects the ones that are git work trees.

pub mod changes;
pub mod ignored;
pub mod siblings;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Errors from building a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("parent path is not a directory: {}", .0.display())]
    ParentNotDir(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run git in {}: {source}", path.display())]
    GitSpawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one git invocation. Callers decide what a failed invocation
/// means for their report, so nothing is raised here on a non-zero exit.
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Trait for running git - allows tests to substitute scripted output
#[async_trait]
pub trait GitRunner: Send + Sync {
    async fn git(&self, dir: &Path, args: &[&str]) -> Result<GitOutput, ReportError>;
}

/// Runs the real `git` binary as `git -C <dir> ...`
#[derive(Debug, Clone, Default)]
pub struct GitCli;

#[async_trait]
impl GitRunner for GitCli {
    async fn git(&self, dir: &Path, args: &[&str]) -> Result<GitOutput, ReportError> {
        debug!("git -C {} {}", dir.display(), args.join(" "));

        let output = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .await
            .map_err(|source| ReportError::GitSpawn {
                path: dir.to_path_buf(),
                source,
            })?;

        Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// A rendered report: the body goes to stdout, warnings to stderr.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub body: String,
    pub warnings: Vec<String>,
}

/// True when `dir` is inside a git work tree.
async fn is_git_repo<G: GitRunner>(git: &G, dir: &Path) -> Result<bool, ReportError> {
    let out = git.git(dir, &["rev-parse", "--is-inside-work-tree"]).await?;
    Ok(out.success && out.stdout.trim() == "true")
}

/// Immediate child directories of `parent` that are git work trees, sorted by
/// name case-insensitively.
async fn sibling_repos<G: GitRunner>(
    git: &G,
    parent: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    if !parent.is_dir() {
        return Err(ReportError::ParentNotDir(parent.to_path_buf()));
    }

    let read_err = |source| ReportError::ReadDir {
        path: parent.to_path_buf(),
        source,
    };

    let mut dirs = Vec::new();
    let mut entries = tokio::fs::read_dir(parent).await.map_err(read_err)?;
    while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort_by_key(|p| dir_name(p).to_lowercase());

    let mut repos = Vec::new();
    for dir in dirs {
        if is_git_repo(git, &dir).await? {
            repos.push(dir);
        }
    }
    Ok(repos)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
