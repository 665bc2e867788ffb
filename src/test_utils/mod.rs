//! Test utilities for skinpack
//!
//! - [`init_test_logging`] - opt-in tracing output for tests
//! - [`TestProject`] - a temporary project directory with helpers
//! - [`fixtures`] - banner, lint configuration and template samples
//!
//! # Example
//!
//! ```rust,no_run
//! use skinpack::test_utils::{TemplateFixture, TestProject};
//!
//! # fn example() -> anyhow::Result<()> {
//! let project = TestProject::builder()?
//!     .with_defaults()
//!     .with_file("src/layout.xml", TemplateFixture::single(".a { color: red; }"))
//!     .build()?;
//!
//! assert!(project.file_exists("package.json"));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod fixtures;

pub use builder::{TestProject, TestProjectBuilder};
pub use fixtures::{BannerFixture, FileFixture, LintFixture, TemplateFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. `level` wins over `RUST_LOG`; with
/// neither set, nothing is logged.
///
/// ```bash
/// RUST_LOG=skinpack=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
