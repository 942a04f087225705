//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::ReportCommand;

/// Sibling git repository snapshot tool
#[derive(Debug, Parser, Clone)]
#[command(name = "reposnap")]
#[command(version = "0.1.0")]
#[command(about = "Capture sibling git repository reports to text files", long_about = None)]
pub struct Cli {
    /// Defaults to `snapshot` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run all report steps and save each one's output to a text file
    Snapshot,

    /// List sibling git repositories and their remotes
    Siblings(ReportCommand),

    /// List ignored files in sibling git repositories
    Ignored(ReportCommand),

    /// List uncommitted changes in sibling git repositories
    Changes(ReportCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;
