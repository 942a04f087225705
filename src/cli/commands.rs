//! CLI command definitions

use clap::Args;
use std::path::PathBuf;

/// Arguments shared by the report commands
#[derive(Debug, Args, Clone)]
pub struct ReportCommand {
    /// Parent directory to scan (defaults to the parent of this executable's
    /// directory)
    #[arg(short, long)]
    pub parent: Option<PathBuf>,
}
