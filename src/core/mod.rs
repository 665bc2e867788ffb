//! Core types and error handling for skinpack
//!
//! - [`error`] - [`SkinError`], [`ErrorContext`] and [`user_friendly_error`]
//! - [`file_error`] - file operation errors that keep the failing path and purpose

pub mod error;
mod error_formatting;
pub mod file_error;

pub use error::{ErrorContext, SkinError, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileOps, FileResultExt};
