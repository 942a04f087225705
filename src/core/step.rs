//! Step domain model

/// A single snapshot step: an external command paired with the file its
/// captured stdout is saved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Command name, resolved through the ambient executable search path.
    pub command: &'static str,

    /// Output file name, relative to the runner's working directory.
    pub output_file: &'static str,
}

/// The fixed step list, in execution order. The runner never reorders,
/// skips, or extends these.
pub const SNAPSHOT_STEPS: [Step; 3] = [
    Step {
        command: "list_sibling_repos",
        output_file: "list_sibling_repos.txt",
    },
    Step {
        command: "list_ignored_files",
        output_file: "list_ignored_files.txt",
    },
    Step {
        command: "list_repo_changes",
        output_file: "list_repo_changes.txt",
    },
];
