//! Error formatting utilities for skinpack
//!
//! Converts internal errors into clear, actionable messages for users.

use super::error::{ErrorContext, SkinError};
use super::file_error::FileOperationError;
use crate::templating::TemplateError;

/// Keywords that indicate permission-related errors
const PERMISSION_ERROR_KEYWORDS: &[&str] = &["permission", "denied", "access"];

/// Convert any error into a user-friendly format with contextual suggestions
///
/// The error chain is walked looking for [`SkinError`], [`TemplateError`] and
/// [`FileOperationError`] values; the first match decides the suggestion. The
/// outermost message is kept in the details so `anyhow` context is not lost.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let top_message = error.to_string();

    let mut current_error: &dyn std::error::Error = error.as_ref();
    loop {
        if let Some(skin_error) = current_error.downcast_ref::<SkinError>() {
            return create_error_context(skin_error, &top_message);
        }

        if let Some(template_error) = current_error.downcast_ref::<TemplateError>() {
            return ErrorContext::new(SkinError::BannerError {
                reason: template_error.to_string(),
            })
            .with_suggestion("Check the banner template syntax and the variables it uses")
            .with_details(template_error.format_with_context());
        }

        if let Some(file_error) = current_error.downcast_ref::<FileOperationError>() {
            if file_error.source.kind() == std::io::ErrorKind::PermissionDenied {
                return ErrorContext::new(SkinError::PermissionDenied {
                    operation: file_error.operation.to_string(),
                    path: file_error.file_path.display().to_string(),
                })
                .with_suggestion("Check file permissions and try running with appropriate privileges")
                .with_details(file_error.user_message());
            }

            return ErrorContext::new(SkinError::FileSystemError {
                operation: file_error.operation.to_string(),
                path: file_error.file_path.display().to_string(),
            })
            .with_suggestion("Check that the path exists and you have the necessary permissions")
            .with_details(file_error.user_message());
        }

        match current_error.source() {
            Some(source) => current_error = source,
            None => break,
        }
    }

    if PERMISSION_ERROR_KEYWORDS.iter().any(|&keyword| top_message.contains(keyword)) {
        return ErrorContext::new(SkinError::Other {
            message: top_message,
        })
        .with_suggestion("Check file permissions and try running with appropriate privileges");
    }

    ErrorContext::new(SkinError::Other {
        message: top_message,
    })
    .with_suggestion("Check the error message above for more details")
}

fn create_error_context(error: &SkinError, top_message: &str) -> ErrorContext {
    let context = match error {
        SkinError::ConfigError {
            message,
        } => ErrorContext::new(SkinError::ConfigError {
            message: message.clone(),
        })
        .with_suggestion("Check skinpack.toml; run 'skinpack init' to write a default one"),
        SkinError::ConfigParseError {
            file,
            reason,
        } => ErrorContext::new(SkinError::ConfigParseError {
            file: file.clone(),
            reason: reason.clone(),
        })
        .with_details(reason.clone())
        .with_suggestion("Fix the syntax error reported above"),
        SkinError::BannerError {
            reason,
        } => ErrorContext::new(SkinError::BannerError {
            reason: reason.clone(),
        })
        .with_suggestion(
            "Check the [files] banner, banner_data and package entries in skinpack.toml",
        ),
        SkinError::LintFailed {
            errors,
            warnings,
        } => ErrorContext::new(SkinError::LintFailed {
            errors: *errors,
            warnings: *warnings,
        })
        .with_suggestion("Fix the reported problems and run the pipeline again"),
        SkinError::ImportNotFound {
            import,
            from,
        } => ErrorContext::new(SkinError::ImportNotFound {
            import: import.clone(),
            from: from.clone(),
        })
        .with_details("Partials may be written with or without the leading '_' and extension")
        .with_suggestion("Check the import path; extracted skins are regenerated by 'skin-extract'"),
        SkinError::CssError {
            file,
            reason,
        } => ErrorContext::new(SkinError::CssError {
            file: file.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Run 'skinpack run skin-lint' to locate the syntax error"),
        SkinError::TaskNotFound {
            name,
        } => ErrorContext::new(SkinError::TaskNotFound {
            name: name.clone(),
        })
        .with_suggestion("Run 'skinpack list' to see the registered tasks"),
        SkinError::DuplicateTask {
            name,
        } => ErrorContext::new(SkinError::DuplicateTask {
            name: name.clone(),
        }),
        SkinError::FileSystemError {
            operation,
            path,
        } => ErrorContext::new(SkinError::FileSystemError {
            operation: operation.clone(),
            path: path.clone(),
        })
        .with_suggestion("Check that the path exists and you have the necessary permissions"),
        SkinError::PermissionDenied {
            operation,
            path,
        } => ErrorContext::new(SkinError::PermissionDenied {
            operation: operation.clone(),
            path: path.clone(),
        })
        .with_suggestion("Check file permissions and try running with appropriate privileges"),
        other => ErrorContext::new(SkinError::Other {
            message: other.to_string(),
        }),
    };

    if context.details.is_none() && top_message != error.to_string() {
        context.with_details(top_message.to_string())
    } else {
        context
    }
}
