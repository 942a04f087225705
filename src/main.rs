use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use reposnap::cli::commands::ReportCommand;
use reposnap::cli::output::{print_report, style, CROSS};
use reposnap::cli::{Cli, Command};
use reposnap::execution::{default_workdir, ProcessLauncher, SnapshotRunner};
use reposnap::report::{self, GitCli, Report, ReportError};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging. Writes to stderr so the snapshot summary and report
    // bodies own stdout.
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match cli.command.unwrap_or(Command::Snapshot) {
        Command::Snapshot => run_snapshot().await,
        Command::Siblings(cmd) => {
            let parent = resolve_parent(&cmd)?;
            finish_report(report::siblings::render(&GitCli, &parent).await)
        }
        Command::Ignored(cmd) => {
            let parent = resolve_parent(&cmd)?;
            finish_report(report::ignored::render(&GitCli, &parent).await)
        }
        Command::Changes(cmd) => {
            let parent = resolve_parent(&cmd)?;
            finish_report(report::changes::render(&GitCli, &parent).await)
        }
    }
}

async fn run_snapshot() -> Result<()> {
    let workdir = default_workdir().context("Failed to resolve snapshot directory")?;
    let runner = SnapshotRunner::new(ProcessLauncher, workdir);

    match runner.run().await {
        Ok(report) => {
            print!("{}", report.summary());
            Ok(())
        }
        Err(err) => {
            error!("{}", err);
            eprintln!("{} snapshot {}", CROSS, style("failed").red());
            std::process::exit(err.exit_code());
        }
    }
}

/// Parent directory for a report: the explicit flag when given, otherwise the
/// parent of the executable's resolved directory.
fn resolve_parent(cmd: &ReportCommand) -> Result<PathBuf> {
    if let Some(parent) = &cmd.parent {
        return Ok(parent.clone());
    }

    let workdir = default_workdir().context("Failed to resolve snapshot directory")?;
    workdir
        .parent()
        .map(Path::to_path_buf)
        .context("Snapshot directory has no parent to scan")
}

fn finish_report(result: Result<Report, ReportError>) -> Result<()> {
    match result {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(err) => {
            eprintln!("{} {}", CROSS, style(&err).red());
            std::process::exit(1);
        }
    }
}
