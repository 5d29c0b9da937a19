//! Terminal reporting for sysman commands.
//!
//! Status lines go to stderr so that nothing is mixed into generated files
//! when a command is piped.

use std::path::Path;

use console::{Style, Term};
use sysman_manual::{BuildReport, Chapter, PageFailure};

/// Styled stderr reporter shared by the subcommands.
pub(crate) struct Output {
    term: Term,
    label: Style,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Print a dimmed label followed by a path, e.g. `Source: man/src`.
    pub(crate) fn location(&self, label: &str, path: &Path) {
        let label = self.label.apply_to(format!("{label}:"));
        self.write(&format!("{label} {}", path.display()));
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.write(&self.green.apply_to(msg).to_string());
    }

    /// Report a page that was left out of the manual (yellow).
    pub(crate) fn page_failure(&self, failure: &PageFailure) {
        self.write(&self.yellow.apply_to(failure_line(failure)).to_string());
    }

    /// Report the outcome of `sysman build`.
    ///
    /// Green when every page was rendered, yellow when some were skipped.
    pub(crate) fn build_summary(&self, report: &BuildReport, output_dir: &Path) {
        let style = if report.is_success() {
            &self.green
        } else {
            &self.yellow
        };
        self.write(&style.apply_to(summary_line(report, output_dir)).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.write(&self.red.apply_to(msg).to_string());
    }

    fn write(&self, line: &str) {
        let _ = self.term.write_line(line);
    }
}

fn failure_line(failure: &PageFailure) -> String {
    format!("Skipped {}: {}", failure.path.display(), failure.error)
}

fn summary_line(report: &BuildReport, output_dir: &Path) -> String {
    let built = report.pages.len();
    let chapters = Chapter::ALL
        .iter()
        .filter(|chapter| !report.registry.titles(**chapter).is_empty())
        .count();
    let line = format!(
        "Manual written to {}: {built} pages in {chapters} chapters",
        output_dir.display()
    );
    if report.is_success() {
        return line;
    }
    let skipped = report.failures.len();
    format!("{line}, {skipped} of {} skipped", built + skipped)
}
