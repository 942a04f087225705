//! Ignored-files report: paths excluded by gitignore rules, per sibling repo

use std::path::Path;

use super::{dir_name, sibling_repos, GitRunner, Report, ReportError};

pub async fn render<G: GitRunner>(git: &G, parent: &Path) -> Result<Report, ReportError> {
    let mut report = Report::default();

    for repo in sibling_repos(git, parent).await? {
        report.body.push_str(&dir_name(&repo));
        report.body.push('\n');

        let out = git
            .git(&repo, &["ls-files", "--others", "-i", "--exclude-standard"])
            .await?;
        let ignored: Vec<&str> = if out.success {
            out.stdout
                .lines()
                .filter(|line| !line.trim().is_empty())
                .collect()
        } else {
            report.warnings.push(format!(
                "git ls-files failed in {}: {}",
                repo.display(),
                out.stderr.trim()
            ));
            Vec::new()
        };

        if ignored.is_empty() {
            report.body.push_str("  (no ignored files)\n");
        } else {
            for item in ignored {
                report.body.push_str(&format!("  - {}\n", item));
            }
        }
        report.body.push('\n');
    }

    Ok(report)
}
