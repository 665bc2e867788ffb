//! Lint findings and the "string" report format.

use colored::Colorize;
use std::path::{Path, PathBuf};

use super::config::Severity;
use crate::utils::fs::to_slash;

/// Rule name used for parser errors.
pub const SYNTAX_ERROR_RULE: &str = "CssSyntaxError";

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub line: usize,
    pub column: usize,
    pub severity: Severity,
    pub rule: String,
    pub message: String,
}

/// Findings of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub findings: Vec<Finding>,
}

impl FileReport {
    pub fn errors(&self) -> usize {
        self.findings.iter().filter(|f| f.severity == Severity::Error).count()
    }

    pub fn warnings(&self) -> usize {
        self.findings.iter().filter(|f| f.severity == Severity::Warning).count()
    }
}

/// Findings of a whole lint run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    pub files: Vec<FileReport>,
}

impl LintReport {
    /// Number of files checked.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn errors(&self) -> usize {
        self.files.iter().map(FileReport::errors).sum()
    }

    pub fn warnings(&self) -> usize {
        self.files.iter().map(FileReport::warnings).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.files.iter().all(|f| f.findings.is_empty())
    }

    /// Renders the report, paths relative to `root`. Empty when clean.
    pub fn format(&self, root: &Path) -> String {
        let mut out = String::new();

        for file in self.files.iter().filter(|f| !f.findings.is_empty()) {
            let display = file.path.strip_prefix(root).map_or_else(|_| to_slash(&file.path), to_slash);
            out.push('\n');
            out.push_str(&format!("{}\n", display.underline()));

            for finding in &file.findings {
                let symbol = match finding.severity {
                    Severity::Error => "✖".red(),
                    Severity::Warning => "⚠".yellow(),
                };
                out.push_str(&format!(
                    "  {}  {symbol}  {}  {}\n",
                    format!("{}:{}", finding.line, finding.column).dimmed(),
                    finding.message,
                    format!("({})", finding.rule).dimmed()
                ));
            }
        }

        if !out.is_empty() {
            let errors = self.errors();
            let warnings = self.warnings();
            let summary = format!(
                "{} problem(s) ({errors} error(s), {warnings} warning(s))",
                errors + warnings
            );
            out.push('\n');
            if errors > 0 {
                out.push_str(&format!("{} {}\n", "✖".red(), summary.red().bold()));
            } else {
                out.push_str(&format!("{} {}\n", "⚠".yellow(), summary.yellow().bold()));
            }
        }

        out
    }
}
