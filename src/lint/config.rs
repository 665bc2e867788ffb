//! Linter configuration in the stylelint JSON format.
//!
//! ```json
//! {
//!   "defaultSeverity": "error",
//!   "rules": {
//!     "block-no-empty": true,
//!     "color-no-invalid-hex": [true, { "severity": "warning" }],
//!     "comment-no-empty": null
//!   }
//! }
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::rules::Rule;
use crate::core::SkinError;
use crate::utils::fs::read_json_file;

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported, does not fail the lint action
    Warning,
    /// Fails the lint action
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default)]
    default_severity: Option<Severity>,
    #[serde(default)]
    rules: BTreeMap<String, serde_json::Value>,
}

/// Enabled rules with their effective severity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintConfig {
    rules: BTreeMap<Rule, Severity>,
}

impl LintConfig {
    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// A missing file is a [`SkinError::ConfigError`]; invalid JSON is a
    /// [`SkinError::ConfigParseError`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SkinError::ConfigError {
                message: format!("lint configuration {} does not exist", path.display()),
            }
            .into());
        }

        let value: serde_json::Value = read_json_file(path)?;
        Self::from_value(value).map_err(|e| {
            SkinError::ConfigParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Builds a configuration from parsed JSON.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let raw: RawConfig = serde_json::from_value(value)?;
        let default_severity = raw.default_severity.unwrap_or(Severity::Error);

        let mut rules = BTreeMap::new();
        for (name, setting) in raw.rules {
            let Some(rule) = Rule::from_name(&name) else {
                tracing::warn!("Unknown lint rule '{name}' ignored");
                continue;
            };
            if let Some(severity) = parse_setting(&name, &setting, default_severity) {
                rules.insert(rule, severity);
            }
        }

        Ok(Self {
            rules,
        })
    }

    /// Enables `rule` at `severity`.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule, severity: Severity) -> Self {
        self.rules.insert(rule, severity);
        self
    }

    /// Severity of `rule`, or `None` when disabled.
    pub fn severity(&self, rule: Rule) -> Option<Severity> {
        self.rules.get(&rule).copied()
    }

    /// Enabled rules.
    pub fn enabled(&self) -> impl Iterator<Item = (Rule, Severity)> + '_ {
        self.rules.iter().map(|(rule, severity)| (*rule, *severity))
    }
}

/// `null` and `false` disable a rule; `[primary, { "severity": … }]`
/// overrides the default severity.
fn parse_setting(name: &str, setting: &serde_json::Value, default: Severity) -> Option<Severity> {
    use serde_json::Value;

    match setting {
        Value::Null | Value::Bool(false) => None,
        Value::Array(items) => {
            let primary = items.first().unwrap_or(&Value::Null);
            if matches!(primary, Value::Null | Value::Bool(false)) {
                return None;
            }
            let severity = items
                .get(1)
                .and_then(|secondary| secondary.get("severity"))
                .and_then(|s| match s.as_str() {
                    Some("warning") => Some(Severity::Warning),
                    Some("error") => Some(Severity::Error),
                    other => {
                        tracing::warn!("Invalid severity {other:?} for rule '{name}'");
                        None
                    }
                })
                .unwrap_or(default);
            Some(severity)
        }
        _ => Some(default),
    }
}
