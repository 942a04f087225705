//! reposnap - captures sibling git repository reports to text files
//!
//! The snapshot runner executes a fixed list of collaborator commands
//! strictly in order, saving each one's stdout verbatim to a file next to the
//! executable. The report modules provide built-in renditions of those
//! collaborators.

pub mod cli;
pub mod core;
pub mod execution;
pub mod report;

// Re-export commonly used types
pub use self::core::{Step, SNAPSHOT_STEPS};
pub use execution::{
    default_workdir, CommandLauncher, LaunchError, ProcessLauncher, RunReport, RunnerError,
    SnapshotRunner,
};
pub use report::{GitCli, GitOutput, GitRunner, Report, ReportError};
