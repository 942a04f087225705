//! Repository-changes report: porcelain status plus upstream ahead/behind
//! counts, per sibling repo

use std::path::Path;

use super::{dir_name, sibling_repos, GitRunner, Report, ReportError};

pub async fn render<G: GitRunner>(git: &G, parent: &Path) -> Result<Report, ReportError> {
    let mut report = Report::default();

    for repo in sibling_repos(git, parent).await? {
        report.body.push_str(&dir_name(&repo));
        report.body.push('\n');

        match upstream_ref(git, &repo).await? {
            Some(upstream) => match ahead_behind(git, &repo, &upstream).await? {
                Some((ahead, behind)) => {
                    report.body.push_str(&format!(
                        "  upstream: {} (ahead {}, behind {})\n",
                        upstream, ahead, behind
                    ));
                }
                None => {
                    report
                        .body
                        .push_str(&format!("  upstream: {} (counts unavailable)\n", upstream));
                }
            },
            None => report.body.push_str("  upstream: (none)\n"),
        }

        let out = git.git(&repo, &["status", "--porcelain"]).await?;
        let changes: Vec<&str> = if out.success {
            out.stdout
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.trim().is_empty())
                .collect()
        } else {
            report.warnings.push(format!(
                "git status failed in {}: {}",
                repo.display(),
                out.stderr.trim()
            ));
            Vec::new()
        };

        if changes.is_empty() {
            report.body.push_str("  (clean)\n");
        } else {
            for line in changes {
                report.body.push_str(&format!("  - {}\n", line));
            }
        }
        report.body.push('\n');
    }

    Ok(report)
}

/// Upstream ref (e.g. origin/main), or None when no upstream is configured.
async fn upstream_ref<G: GitRunner>(
    git: &G,
    repo: &Path,
) -> Result<Option<String>, ReportError> {
    let out = git
        .git(
            repo,
            &["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"],
        )
        .await?;
    if !out.success {
        return Ok(None);
    }

    let upstream = out.stdout.trim();
    Ok(if upstream.is_empty() {
        None
    } else {
        Some(upstream.to_string())
    })
}

/// (ahead, behind) commit counts versus the upstream ref.
async fn ahead_behind<G: GitRunner>(
    git: &G,
    repo: &Path,
    upstream: &str,
) -> Result<Option<(u64, u64)>, ReportError> {
    let range = format!("HEAD...{}", upstream);
    let out = git
        .git(repo, &["rev-list", "--left-right", "--count", &range])
        .await?;
    if !out.success {
        return Ok(None);
    }

    let mut parts = out.stdout.split_whitespace();
    let (Some(ahead), Some(behind), None) = (parts.next(), parts.next(), parts.next()) else {
        return Ok(None);
    };
    match (ahead.parse::<u64>(), behind.parse::<u64>()) {
        (Ok(ahead), Ok(behind)) => Ok(Some((ahead, behind))),
        _ => Ok(None),
    }
}
