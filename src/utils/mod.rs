//! Cross-cutting utilities: file system helpers, progress output, CSS
//! source masking and text helpers.

pub mod css;
pub mod fs;
pub mod progress;
pub mod text;

pub use fs::{atomic_write, ensure_dir, normalize_path, safe_write};
pub use progress::ProgressBar;
