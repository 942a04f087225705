//! Sibling-repository report: each repo's remotes, with a warning when the
//! folder name differs from the default clone directory of its primary remote

use std::collections::BTreeMap;
use std::path::Path;

use super::{dir_name, sibling_repos, GitRunner, Report, ReportError};

pub async fn render<G: GitRunner>(git: &G, parent: &Path) -> Result<Report, ReportError> {
    let mut report = Report::default();

    for repo in sibling_repos(git, parent).await? {
        let name = dir_name(&repo);
        let remotes = fetch_remotes(git, &repo).await?;

        report.body.push_str(&name);
        report.body.push('\n');
        if remotes.is_empty() {
            report.body.push_str("  (no remotes)\n");
        } else {
            for (remote, url) in ordered_remotes(&remotes) {
                report.body.push_str(&format!("  - {}: {}\n", remote, url));
            }
        }
        report.body.push('\n');

        if let Some((remote, url)) = primary_remote(&remotes) {
            let expected = repo_name_from_url(url);
            if !expected.is_empty() && name != expected {
                report.warnings.push(format!(
                    "WARNING: folder '{}' differs from default clone dir '{}' (remote: {})",
                    name, expected, remote
                ));
            }
        }
    }

    Ok(report)
}

/// Fetch URLs keyed by remote name, parsed from `git remote -v`. Only the
/// fetch direction is kept, one URL per remote.
async fn fetch_remotes<G: GitRunner>(
    git: &G,
    repo: &Path,
) -> Result<BTreeMap<String, String>, ReportError> {
    let out = git.git(repo, &["remote", "-v"]).await?;
    if !out.success {
        return Ok(BTreeMap::new());
    }

    let mut remotes = BTreeMap::new();
    for line in out.stdout.lines() {
        let mut parts = line.split_whitespace();
        let (Some(name), Some(url), Some(direction)) =
            (parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        let direction = direction.trim_matches(|c| c == '(' || c == ')');
        if direction == "fetch" && !remotes.contains_key(name) {
            remotes.insert(name.to_string(), url.to_string());
        }
    }
    Ok(remotes)
}

/// Remotes ordered origin-first, then alphabetically.
fn ordered_remotes(remotes: &BTreeMap<String, String>) -> Vec<(&str, &str)> {
    let mut out: Vec<(&str, &str)> = remotes
        .iter()
        .map(|(name, url)| (name.as_str(), url.as_str()))
        .collect();
    out.sort_by_key(|(name, _)| (*name != "origin", name.to_string()));
    out
}

/// The remote to derive the expected clone directory from: origin when
/// present, otherwise the alphabetically first.
fn primary_remote(remotes: &BTreeMap<String, String>) -> Option<(&str, &str)> {
    if let Some(url) = remotes.get("origin") {
        return Some(("origin", url.as_str()));
    }
    remotes
        .iter()
        .next()
        .map(|(name, url)| (name.as_str(), url.as_str()))
}

/// Default clone directory implied by a remote URL. Handles scheme URLs,
/// scp-style ssh addresses, trailing slashes, and a `.git` suffix.
fn repo_name_from_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let path_part = if let Some((_, rest)) = trimmed.split_once("://") {
        rest.split_once('/').map(|(_, path)| path).unwrap_or("")
    } else if let Some((_, rest)) = trimmed.split_once(':') {
        rest
    } else {
        trimmed
    };

    let repo = path_part.rsplit('/').next().unwrap_or(path_part);
    repo.strip_suffix(".git").unwrap_or(repo).to_string()
}
