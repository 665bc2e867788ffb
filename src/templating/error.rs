//! Structured banner template errors.

use std::path::PathBuf;

/// Banner template errors with the location they occurred at.
#[derive(Debug)]
pub enum TemplateError {
    /// The template referenced a variable absent from `data` and `pkg`
    VariableNotFound {
        variable: String,
        available_variables: Box<Vec<String>>,
        location: Box<ErrorLocation>,
    },

    /// Tera could not parse or evaluate the template
    SyntaxError {
        message: String,
        location: Box<ErrorLocation>,
    },
}

/// Where in the banner template an error occurred
#[derive(Debug, Clone, Default)]
pub struct ErrorLocation {
    /// Banner template file, if the text came from disk
    pub file_path: Option<PathBuf>,
    /// Line number if Tera reported one
    pub line_number: Option<usize>,
    /// Surrounding template lines, 1-indexed
    pub context_lines: Option<Vec<(usize, String)>>,
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::VariableNotFound {
                variable,
                ..
            } => {
                write!(f, "Template variable not found: '{variable}'")
            }
            TemplateError::SyntaxError {
                message,
                ..
            } => {
                write!(f, "Template syntax error: {message}")
            }
        }
    }
}

impl std::error::Error for TemplateError {}

impl TemplateError {
    /// Multi-line description with location and hints, used as error details
    /// by the CLI.
    pub fn format_with_context(&self) -> String {
        match self {
            TemplateError::VariableNotFound {
                variable,
                available_variables,
                location,
            } => format_variable_not_found_error(variable, available_variables, location),
            TemplateError::SyntaxError {
                message,
                location,
            } => format_syntax_error(message, location),
        }
    }
}

fn format_location(msg: &mut String, location: &ErrorLocation) {
    if let Some(path) = &location.file_path {
        msg.push_str(&format!("File: {}\n", path.display()));
    }
    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {line}\n"));
    }
    if let Some(lines) = &location.context_lines {
        msg.push('\n');
        for (number, text) in lines {
            let marker = if Some(*number) == location.line_number {
                ">"
            } else {
                " "
            };
            msg.push_str(&format!("{marker} {number:>4} | {text}\n"));
        }
    }
}

fn format_variable_not_found_error(
    variable: &str,
    available_variables: &[String],
    location: &ErrorLocation,
) -> String {
    let mut msg = String::new();
    msg.push_str("ERROR: Banner Variable Not Found\n\n");
    msg.push_str(&format!("Variable: {variable}\n"));
    format_location(&mut msg, location);
    msg.push('\n');

    if !variable.starts_with("data.") && !variable.starts_with("pkg.") {
        msg.push_str("Banner values live under 'data' (banner data file) or 'pkg' (package file).\n\n");
    }

    if !available_variables.is_empty() {
        msg.push_str("Available variables:\n");
        for var in available_variables.iter().take(10) {
            msg.push_str(&format!("  {var}\n"));
        }
        if available_variables.len() > 10 {
            msg.push_str(&format!("  ... and {} more\n", available_variables.len() - 10));
        }
    }

    msg
}

fn format_syntax_error(message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();
    msg.push_str("ERROR: Banner Template Syntax Error\n\n");
    msg.push_str(&format!("{message}\n"));
    format_location(&mut msg, location);
    msg
}
