//! File system utilities for skinpack.
//!
//! - [`atomic`] - write-then-rename file writes
//! - [`dirs`] - directory creation
//! - [`paths`] - lexical path normalization and display helpers
//! - [`formats`] - text and JSON readers with path context

pub mod atomic;
pub mod dirs;
pub mod formats;
pub mod paths;

pub use atomic::{atomic_write, safe_write};
pub use dirs::{ensure_dir, ensure_parent_dir};
pub use formats::{read_json_file, read_text_file};
pub use paths::{absolutize, normalize_path, to_slash};
