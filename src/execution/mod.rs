//! Snapshot execution

pub mod launcher;
pub mod runner;

pub use launcher::{CommandLauncher, LaunchError, ProcessLauncher};
pub use runner::{default_workdir, RunReport, RunnerError, SnapshotRunner};
