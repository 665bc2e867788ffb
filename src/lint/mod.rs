//! Stylesheet linting.
//!
//! A small built-in linter compatible with the stylelint configuration
//! format. Every matched stylesheet is parsed with `lightningcss` (rules it
//! cannot parse are reported as `CssSyntaxError`; invalid declarations such
//! as the `*zoom: 1` hack are skipped) and checked with the rules enabled in
//! the configuration. Inline `stylelint-disable` comments are
//! honoured.
//!
//! The lint action fails with [`SkinError::LintFailed`] when any file has an
//! error-level finding, after printing the report. Warnings alone never fail.

mod config;
mod directives;
mod report;
mod rules;
mod source_map;

pub use config::{LintConfig, Severity};
pub use report::{FileReport, Finding, LintReport, SYNTAX_ERROR_RULE};
pub use rules::Rule;

use anyhow::{Context, Result};
use lightningcss::error::ErrorLocation;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::config::LintOptions;
use crate::core::{FileOps, SkinError};
use crate::pipeline::discover;
use crate::utils::css::blank_code;
use directives::DisabledRanges;
use rules::ScannedSource;
use source_map::LineIndex;

/// Lints stylesheet text against a configuration.
#[derive(Debug, Clone)]
pub struct Linter {
    config: LintConfig,
}

impl Linter {
    pub fn new(config: LintConfig) -> Self {
        Self {
            config,
        }
    }

    /// Lints one stylesheet. `filename` only appears in parser messages.
    ///
    /// Findings are sorted by position.
    pub fn lint_source(&self, text: &str, filename: &str) -> Vec<Finding> {
        let lines = LineIndex::new(text);
        let mut findings = Vec::new();

        findings.extend(syntax_errors(text, filename, &lines));

        let source = ScannedSource::scan(text);
        let disabled = DisabledRanges::from_comments(&source.comments, &lines);

        for (rule, severity) in self.config.enabled() {
            for violation in rule.check(&source) {
                let (line, column) = lines.position(violation.offset);
                if disabled.is_disabled(rule.name(), violation.offset, line) {
                    continue;
                }
                findings.push(Finding {
                    line,
                    column,
                    severity,
                    rule: rule.name().to_string(),
                    message: violation.message,
                });
            }
        }

        findings.sort_by(|a, b| (a.line, a.column, &a.rule).cmp(&(b.line, b.column, &b.rule)));
        findings
    }

    /// Lints files from disk.
    pub fn lint_files(&self, paths: &[PathBuf]) -> Result<LintReport> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let text = FileOps::read_blocking(path, "linting stylesheet")?;
            let findings = self.lint_source(&text, &path.display().to_string());
            tracing::debug!("Linted {}: {} finding(s)", path.display(), findings.len());
            files.push(FileReport {
                path: path.clone(),
                findings,
            });
        }
        Ok(LintReport {
            files,
        })
    }
}

/// Parses `text` with error recovery and reports every rule the parser had
/// to drop as an error-level finding.
///
/// Problems inside a declaration are not reported: the next `;` or `}`
/// after the error position closes a declaration, while a `{` (or nothing)
/// means a selector or at-rule prelude failed.
fn syntax_errors(text: &str, filename: &str, lines: &LineIndex<'_>) -> Vec<Finding> {
    let warnings = Arc::new(RwLock::new(Vec::new()));
    let options = ParserOptions {
        filename: filename.to_string(),
        error_recovery: true,
        warnings: Some(Arc::clone(&warnings)),
        ..ParserOptions::default()
    };

    let mut problems: Vec<(String, Option<ErrorLocation>)> = Vec::new();
    if let Err(error) = StyleSheet::parse(text, options) {
        problems.push((error.kind.to_string(), error.loc));
    }
    if let Ok(recovered) = warnings.read() {
        problems.extend(recovered.iter().map(|w| (w.kind.to_string(), w.loc.clone())));
    }
    if problems.is_empty() {
        return Vec::new();
    }

    let code = blank_code(text);
    problems
        .into_iter()
        .filter_map(|(message, loc)| {
            // lightningcss lines are 0-based, columns 1-based
            let (line, column) =
                loc.as_ref().map_or((1, 1), |loc| (loc.line as usize + 1, (loc.column as usize).max(1)));
            if in_declaration(&code, lines.offset(line, column)) {
                tracing::trace!("Skipping invalid declaration at {filename}:{line}:{column}: {message}");
                return None;
            }
            Some(Finding {
                line,
                column,
                severity: Severity::Error,
                rule: SYNTAX_ERROR_RULE.to_string(),
                message,
            })
        })
        .collect()
}

fn in_declaration(code: &str, offset: usize) -> bool {
    code.get(offset..)
        .and_then(|rest| rest.find(['{', ';', '}']))
        .is_some_and(|pos| code.as_bytes()[offset + pos] != b'{')
}

/// Runs the lint action.
///
/// With no matched stylesheets the action is a no-op and the configuration
/// file is not read.
pub async fn run(options: &LintOptions, project_root: &Path) -> Result<LintReport> {
    let files = discover(&options.sources).await?;

    if files.is_empty() {
        tracing::debug!("No stylesheets to lint in {}", options.sources.base().display());
        return Ok(LintReport::default());
    }

    let config = LintConfig::load(&options.config_file)?;
    let linter = Linter::new(config);
    let report = tokio::task::spawn_blocking(move || linter.lint_files(&files))
        .await
        .context("Lint task panicked")??;

    let formatted = report.format(project_root);
    if !formatted.is_empty() {
        print!("{formatted}");
    }

    let errors = report.errors();
    let warnings = report.warnings();
    if errors > 0 {
        return Err(SkinError::LintFailed {
            errors,
            warnings,
        }
        .into());
    }

    tracing::info!("Linted {} stylesheet(s), {warnings} warning(s)", report.file_count());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::FileSet;
    use tempfile::TempDir;

    fn linter() -> Linter {
        let config = Rule::ALL
            .into_iter()
            .fold(LintConfig::default(), |config, rule| config.with_rule(rule, Severity::Error));
        Linter::new(config)
    }

    #[test]
    fn test_clean_source() {
        let findings = linter().lint_source(".a { color: #fff; }\n", "a.css");
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn test_findings_sorted_with_positions() {
        let text = ".a { --c: #ff; }\n.b {}\n";
        let findings = linter().lint_source(text, "a.css");
        let summary: Vec<_> = findings.iter().map(|f| (f.line, f.column, f.rule.as_str())).collect();
        assert_eq!(summary, vec![(1, 11, "color-no-invalid-hex"), (2, 4, "block-no-empty")]);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let findings = linter().lint_source("..a { color: red; }\n", "broken.css");
        assert!(findings.iter().any(|f| f.rule == SYNTAX_ERROR_RULE && f.severity == Severity::Error));
    }

    #[test]
    fn test_declaration_hacks_are_not_syntax_errors() {
        let text = ".a { *zoom: 1; _height: 1px; color: red; }\n";
        let findings = linter().lint_source(text, "hacks.css");
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn test_broken_rule_after_hack_still_reported() {
        let text = ".a { *zoom: 1; }\n..b { color: red; }\n";
        let findings = linter().lint_source(text, "broken.css");
        assert_eq!(findings.len(), 1, "{findings:?}");
        assert_eq!((findings[0].line, findings[0].rule.as_str()), (2, SYNTAX_ERROR_RULE));
    }

    #[test]
    fn test_in_declaration() {
        let code = ".a { *zoom: 1; }\n..b {}";
        assert!(in_declaration(code, 5));
        assert!(!in_declaration(code, 18));
        assert!(!in_declaration(code, code.len()));
    }

    #[test]
    fn test_disabled_region_is_skipped() {
        let text = "/* stylelint-disable block-no-empty */\n.a {}\n";
        assert!(linter().lint_source(text, "a.css").is_empty());
    }

    #[test]
    fn test_disabled_rule_not_reported() {
        let linter = Linter::new(LintConfig::default().with_rule(Rule::CommentNoEmpty, Severity::Warning));
        let findings = linter.lint_source(".a {}\n/**/\n", "a.css");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    fn options(root: &Path) -> LintOptions {
        LintOptions {
            sources: FileSet::new(root.join("src")).include("**/*.css").unwrap(),
            config_file: root.join(".stylelintrc.json"),
        }
    }

    #[tokio::test]
    async fn test_run_no_files_is_noop() {
        let temp = TempDir::new().unwrap();
        let report = run(&options(temp.path()), temp.path()).await.unwrap();
        assert_eq!(report.file_count(), 0);
    }

    #[tokio::test]
    async fn test_run_fails_on_error() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("src/a.css"), ".a {}\n").unwrap();
        std::fs::write(root.join(".stylelintrc.json"), r#"{"rules": {"block-no-empty": true}}"#).unwrap();

        let err = run(&options(root), root).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SkinError>(),
            Some(SkinError::LintFailed { errors: 1, warnings: 0 })
        ));
    }

    #[tokio::test]
    async fn test_run_passes_with_warnings() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("src/a.css"), ".a {}\n").unwrap();
        std::fs::write(
            root.join(".stylelintrc.json"),
            r#"{"defaultSeverity": "warning", "rules": {"block-no-empty": true}}"#,
        )
        .unwrap();

        let report = run(&options(root), root).await.unwrap();
        assert_eq!(report.warnings(), 1);
    }

    #[tokio::test]
    async fn test_run_missing_config_with_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("src/a.css"), ".a { color: red; }\n").unwrap();

        let err = run(&options(root), root).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<SkinError>(), Some(SkinError::ConfigError { .. })));
    }
}
