//! CLI output formatting

use crate::report::Report;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");

/// Print a rendered report: body to stdout, warnings to stderr, matching the
/// stream separation the snapshot runner preserves for collaborators.
pub fn print_report(report: &Report) {
    print!("{}", report.body);
    for warning in &report.warnings {
        eprintln!("{}", warning);
    }
}
