//! Tera rendering with structured errors.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tera::{Context as TeraContext, Tera};

use super::error::{ErrorLocation, TemplateError};

static VARIABLE_NOT_FOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Variable `([^`]+)` not found|Unknown variable `([^`]+)`)")
        .expect("variable pattern is valid")
});

static LINE_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+):(\d+)").expect("line:column pattern is valid"));

/// Renders one-off templates against a Tera context.
///
/// A fresh [`Tera`] instance is used per render; banners are rendered once
/// per compile action so there is nothing worth caching.
#[derive(Debug, Default)]
pub struct TemplateRenderer {
    source_path: Option<PathBuf>,
}

impl TemplateRenderer {
    /// Creates a renderer that reports errors against `source_path`.
    pub fn new(source_path: Option<&Path>) -> Self {
        Self {
            source_path: source_path.map(Path::to_path_buf),
        }
    }

    /// Renders `template_content` with `context`.
    pub fn render(
        &self,
        template_content: &str,
        context: &TeraContext,
    ) -> Result<String, TemplateError> {
        tracing::debug!("Rendering template ({} bytes)", template_content.len());

        let mut tera = Tera::default();
        tera.render_str(template_content, context)
            .map_err(|e| self.parse_tera_error(&e, template_content, context))
    }

    fn parse_tera_error(
        &self,
        error: &tera::Error,
        template_content: &str,
        context: &TeraContext,
    ) -> TemplateError {
        let line_number = Self::extract_line_from_tera_error(error);
        let context_lines = line_number
            .map(|line| Self::extract_context_lines(template_content, line, 2))
            .filter(|lines| !lines.is_empty());

        let location = Box::new(ErrorLocation {
            file_path: self.source_path.clone(),
            line_number,
            context_lines,
        });

        let full_message = Self::format_tera_error(error);
        if let Some(variable) = Self::extract_variable_name(&full_message) {
            return TemplateError::VariableNotFound {
                variable,
                available_variables: Box::new(Self::extract_available_variables(context)),
                location,
            };
        }

        TemplateError::SyntaxError {
            message: full_message,
            location,
        }
    }

    fn extract_variable_name(error_msg: &str) -> Option<String> {
        let caps = VARIABLE_NOT_FOUND.captures(error_msg)?;
        caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str().to_string())
    }

    /// Lists every leaf of the context as a dotted path, e.g. `pkg.version`.
    fn extract_available_variables(context: &TeraContext) -> Vec<String> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<String>) {
            match value {
                serde_json::Value::Object(map) if !map.is_empty() => {
                    for (key, child) in map {
                        let path = if prefix.is_empty() {
                            key.clone()
                        } else {
                            format!("{prefix}.{key}")
                        };
                        walk(&path, child, out);
                    }
                }
                _ => {
                    if !prefix.is_empty() {
                        out.push(prefix.to_string());
                    }
                }
            }
        }

        let mut vars = Vec::new();
        walk("", &context.clone().into_json(), &mut vars);
        vars.sort();
        vars
    }

    /// Returns up to `context_size` lines around `error_line` (1-indexed).
    fn extract_context_lines(
        content: &str,
        error_line: usize,
        context_size: usize,
    ) -> Vec<(usize, String)> {
        let lines: Vec<&str> = content.lines().collect();
        let total_lines = lines.len();

        if error_line == 0 || error_line > total_lines {
            return Vec::new();
        }

        let start = error_line.saturating_sub(context_size + 1);
        let end = (error_line + context_size).min(total_lines);

        lines[start..end]
            .iter()
            .enumerate()
            .map(|(idx, line)| (start + idx + 1, (*line).to_string()))
            .collect()
    }

    /// Tera puts `line:column` into parse error messages.
    fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
        let error_msg = format!("{error:?}");
        let caps = LINE_COLUMN.captures(&error_msg)?;
        caps.get(1)?.as_str().parse::<usize>().ok()
    }

    /// Flattens a Tera error chain into one message, dropping the internal
    /// one-off template name.
    pub fn format_tera_error(error: &tera::Error) -> String {
        use std::error::Error;

        let mut all_messages = vec![error.to_string()];
        let mut current_error: Option<&dyn Error> = error.source();
        while let Some(err) = current_error {
            all_messages.push(err.to_string());
            current_error = err.source();
        }

        let messages: Vec<String> = all_messages
            .into_iter()
            .map(|msg| {
                msg.replace("while rendering '__tera_one_off'", "")
                    .replace("Failed to render '__tera_one_off'", "Template rendering failed")
                    .replace("Failed to parse '__tera_one_off'", "Template syntax error")
                    .replace("'__tera_one_off'", "template")
                    .trim()
                    .to_string()
            })
            .filter(|cleaned| {
                !cleaned.is_empty()
                    && cleaned != "Template rendering failed"
                    && cleaned != "Template syntax error"
            })
            .collect();

        if messages.is_empty() {
            "Template syntax error (see details above)".to_string()
        } else {
            messages.join("\n  → ")
        }
    }
}
