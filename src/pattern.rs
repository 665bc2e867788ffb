//! Glob-based file selection.
//!
//! Every pipeline action starts from a [`FileSet`]: a base directory, one or
//! more include patterns and optional exclusions. Patterns are matched against
//! paths relative to the base directory using `/` separators.
//!
//! # Pattern Syntax
//!
//! - `*` matches any sequence of characters within a single path component
//! - `**` matches any number of path components, including none
//! - `?` matches any single character
//! - `[abc]` / `[a-z]` match one character from the set or range
//!
//! # Empty Matches
//!
//! A missing base directory or a pattern that matches nothing is not an
//! error: [`FileSet::resolve`] returns an empty list and the action becomes a
//! no-op.

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::utils::fs::{normalize_path, to_slash};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A compiled glob pattern.
///
/// # Examples
///
/// ```rust
/// use skinpack::pattern::PatternMatcher;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let matcher = PatternMatcher::new("**/*.xml")?;
/// assert!(matcher.matches(Path::new("a.xml")));
/// assert!(matcher.matches(Path::new("layouts/post.xml")));
/// assert!(!matcher.matches(Path::new("skin.css")));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Pattern,
    original_pattern: String,
}

impl PatternMatcher {
    /// Compiles a glob pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern contains invalid glob syntax.
    pub fn new(pattern_str: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern_str)
            .with_context(|| format!("Invalid glob pattern: {pattern_str}"))?;

        Ok(Self {
            pattern,
            original_pattern: pattern_str.to_string(),
        })
    }

    /// Checks if a relative path matches the pattern.
    pub fn matches(&self, path: &Path) -> bool {
        self.pattern.matches_with(&to_slash(path), MATCH_OPTIONS)
    }

    /// Returns the original pattern string.
    pub fn pattern(&self) -> &str {
        &self.original_pattern
    }
}

/// A set of files selected by include patterns under a base directory.
///
/// # Examples
///
/// ```rust,no_run
/// use skinpack::pattern::FileSet;
///
/// # fn example() -> anyhow::Result<()> {
/// let templates = FileSet::new("/project/src")
///     .include("**/*.xml")?
///     .exclude_dir("/project/node_modules");
///
/// for path in templates.resolve()? {
///     println!("template: {}", path.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileSet {
    base: PathBuf,
    includes: Vec<PatternMatcher>,
    excludes: Vec<PatternMatcher>,
    exclude_dirs: Vec<PathBuf>,
}

impl FileSet {
    /// Creates an empty file set rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: normalize_path(&base.into()),
            includes: Vec::new(),
            excludes: Vec::new(),
            exclude_dirs: Vec::new(),
        }
    }

    /// Adds an include pattern, relative to the base directory.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.includes.push(PatternMatcher::new(pattern)?);
        Ok(self)
    }

    /// Adds an exclusion pattern, relative to the base directory.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        let matcher = PatternMatcher::new(pattern)
            .with_context(|| format!("Invalid exclusion pattern: {pattern}"))?;
        self.excludes.push(matcher);
        Ok(self)
    }

    /// Excludes everything below `dir`. Excluded directories are not walked.
    pub fn exclude_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.exclude_dirs.push(normalize_path(&dir.into()));
        self
    }

    /// The directory patterns are relative to.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// The include patterns, as written.
    pub fn patterns(&self) -> Vec<&str> {
        self.includes.iter().map(PatternMatcher::pattern).collect()
    }

    fn is_excluded_dir(&self, path: &Path) -> bool {
        self.exclude_dirs.iter().any(|dir| path.starts_with(dir))
    }

    /// Resolves the set to absolute file paths in sorted order.
    ///
    /// Symlinks are not followed. Unreadable entries are skipped.
    pub fn resolve(&self) -> Result<Vec<PathBuf>> {
        debug!("Resolving {:?} in {}", self.patterns(), self.base.display());

        if !self.base.is_dir() {
            debug!("Base directory {} does not exist, nothing to match", self.base.display());
            return Ok(Vec::new());
        }

        let mut matches = BTreeSet::new();

        let walker = WalkDir::new(&self.base)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(entry.path()));

        for entry in walker.filter_map(std::result::Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Ok(relative_path) = path.strip_prefix(&self.base) else {
                continue;
            };

            trace!("Checking path: {}", relative_path.display());

            let included = self.includes.iter().any(|m| m.matches(relative_path));
            let excluded = self.excludes.iter().any(|m| m.matches(relative_path));
            if included && !excluded {
                matches.insert(path.to_path_buf());
            }
        }

        debug!("Found {} matches in {}", matches.len(), self.base.display());
        Ok(matches.into_iter().collect())
    }
}
