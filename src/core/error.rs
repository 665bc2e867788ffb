//! Error handling for skinpack
//!
//! This module provides the error types and user-friendly error reporting for
//! the skin build pipeline. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`SkinError`] - Enumerated error types for every failure mode of the pipeline
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//!
//! Use [`user_friendly_error`] to convert any `anyhow::Error` into an
//! [`ErrorContext`] ready for display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use skinpack::core::{ErrorContext, SkinError};
//!
//! let context = ErrorContext::new(SkinError::TaskNotFound {
//!     name: "skin-build".to_string(),
//! })
//! .with_suggestion("Run 'skinpack list' to see the registered tasks");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

pub use super::error_formatting::user_friendly_error;

/// The main error type for skinpack operations.
///
/// # Error Categories
///
/// ## Configuration
/// - [`ConfigError`] - Invalid configuration values
/// - [`ConfigParseError`] - `skinpack.toml` or a JSON data file failed to parse
/// - [`BannerError`] - Banner template or banner data could not be loaded
///
/// ## Pipeline
/// - [`LintFailed`] - The linter reported error-level findings
/// - [`ImportNotFound`] - An `@import` could not be resolved
/// - [`CssError`] - The CSS processor failed to parse or print a stylesheet
/// - [`TaskNotFound`] - An unregistered task was requested
///
/// ## File System
/// - [`FileSystemError`] - General file system failure
/// - [`PermissionDenied`] - Insufficient permissions
///
/// [`ConfigError`]: SkinError::ConfigError
/// [`ConfigParseError`]: SkinError::ConfigParseError
/// [`BannerError`]: SkinError::BannerError
/// [`LintFailed`]: SkinError::LintFailed
/// [`ImportNotFound`]: SkinError::ImportNotFound
/// [`CssError`]: SkinError::CssError
/// [`TaskNotFound`]: SkinError::TaskNotFound
/// [`FileSystemError`]: SkinError::FileSystemError
/// [`PermissionDenied`]: SkinError::PermissionDenied
#[derive(Error, Debug)]
pub enum SkinError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// A configuration or data file could not be parsed
    #[error("Invalid syntax in {file}")]
    ConfigParseError {
        /// Path to the file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// The banner template, banner data or package metadata could not be loaded
    #[error("Failed to load banner: {reason}")]
    BannerError {
        /// Why the banner could not be prepared
        reason: String,
    },

    /// The linter reported error-level findings
    ///
    /// The formatted lint report has already been printed when this error is
    /// returned; the error itself only carries the totals.
    #[error("Lint failed with {errors} error(s) and {warnings} warning(s)")]
    LintFailed {
        /// Number of error-level findings
        errors: usize,
        /// Number of warning-level findings
        warnings: usize,
    },

    /// An `@import` directive did not resolve to a stylesheet
    #[error("Cannot resolve import '{import}' from {from}")]
    ImportNotFound {
        /// The import specifier as written in the stylesheet
        import: String,
        /// The stylesheet containing the import
        from: String,
    },

    /// The CSS processor rejected a stylesheet
    #[error("Failed to process stylesheet {file}: {reason}")]
    CssError {
        /// The stylesheet being processed
        file: String,
        /// The processor's message
        reason: String,
    },

    /// A task name that is not registered was requested
    #[error("Task '{name}' is not registered")]
    TaskNotFound {
        /// The requested task name
        name: String,
    },

    /// A task with the same name is already registered
    #[error("Task '{name}' is already registered")]
    DuplicateTask {
        /// The conflicting task name
        name: String,
    },

    /// General file system error
    #[error("File system error: {operation} failed for {path}")]
    FileSystemError {
        /// The operation that failed
        operation: String,
        /// The path involved
        path: String,
    },

    /// Permission denied
    #[error("Permission denied: {operation} on {path}")]
    PermissionDenied {
        /// The operation that was denied
        operation: String,
        /// The path involved
        path: String,
    },

    /// Any other failure
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error context wrapper that adds user-friendly details and suggestions.
///
/// Displayed by the CLI with color coding: the error in red, details in
/// yellow and the suggestion in green.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying skinpack error
    pub error: SkinError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`SkinError`].
    #[must_use]
    pub const fn new(error: SkinError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}
