//! `@import` inlining.
//!
//! Imports are looked up relative to the importing file, then the project
//! root, then the installed-package directory. Partials may be named with a
//! leading underscore and without the extension:
//!
//! ```css
//! @import "base";             /* base.css or _base.css */
//! @import "components/*";     /* every partial in components/, sorted */
//! @import "print" print;      /* wrapped in @media print { … } */
//! ```
//!
//! Remote imports (`http:`, `https:`, `//`) are not inlined; they are moved
//! to the top of the output, where `@import` rules must be.

use anyhow::Result;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::beautify::ImportBeautifier;
use crate::core::{FileOps, SkinError};
use crate::pattern::FileSet;
use crate::pipeline::{SourceFile, Transform};
use crate::utils::css::blank_code;
use crate::utils::fs::{normalize_path, to_slash};

/// A normalized import statement on its own line.
static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*@import "([^"]*)"(?: ([^;]*))?;[ \t]*(?:\r?\n)?"#)
        .expect("import line pattern is valid")
});

fn is_remote(spec: &str) -> bool {
    let lower = spec.to_ascii_lowercase();
    lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("//")
}

fn is_glob(spec: &str) -> bool {
    spec.contains(['*', '?', '['])
}

/// Inlines local `@import`s recursively.
#[derive(Debug, Clone)]
pub struct ImportResolver {
    project_root: PathBuf,
    packages_dir: PathBuf,
    extension: String,
}

/// Per-entry state: files already inlined and remote imports to hoist.
#[derive(Default)]
struct ResolveState {
    seen: HashSet<PathBuf>,
    remote: Vec<String>,
}

impl ImportResolver {
    /// `extension` includes the dot, e.g. `.css`.
    pub fn new(
        project_root: impl Into<PathBuf>,
        packages_dir: impl Into<PathBuf>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            packages_dir: packages_dir.into(),
            extension: extension.into(),
        }
    }

    /// Inlines the imports of `contents`, which was read from `path`.
    pub fn resolve(&self, contents: &str, path: &Path) -> Result<String> {
        let mut state = ResolveState::default();
        state.seen.insert(normalize_path(path));

        let body = self.inline(contents, path, &mut state)?;
        if state.remote.is_empty() {
            return Ok(body);
        }

        let mut out = state.remote.join("\n");
        out.push('\n');
        out.push_str(&body);
        Ok(out)
    }

    fn inline(&self, contents: &str, importer: &Path, state: &mut ResolveState) -> Result<String> {
        let mut out = String::with_capacity(contents.len());
        let mut last = 0;
        let code = blank_code(contents);

        for caps in IMPORT_LINE.captures_iter(&code) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&contents[last..whole.start()]);
            last = whole.end();

            let spec = caps.get(1).map_or("", |m| &contents[m.range()]);
            let media = caps.get(2).map_or("", |m| &contents[m.range()]).trim();

            if is_remote(spec) {
                let statement = contents[whole.range()].trim().to_string();
                if !state.remote.contains(&statement) {
                    state.remote.push(statement);
                }
                continue;
            }

            let mut inlined = String::new();
            for file in self.lookup(spec, importer)? {
                let key = normalize_path(&file);
                if !state.seen.insert(key) {
                    tracing::debug!("Skipping {} (already imported)", file.display());
                    continue;
                }

                tracing::trace!("Inlining {} into {}", file.display(), importer.display());
                let text = FileOps::read_blocking(&file, "inlining imported stylesheet")?;
                let text = self.inline(&ImportBeautifier::beautify(&text), &file, state)?;
                inlined.push_str(&text);
                if !inlined.ends_with('\n') {
                    inlined.push('\n');
                }
            }

            if media.is_empty() || inlined.is_empty() {
                out.push_str(&inlined);
            } else {
                out.push_str(&format!("@media {media} {{\n{inlined}}}\n"));
            }
        }

        out.push_str(&contents[last..]);
        Ok(out)
    }

    fn search_dirs(&self, importer: &Path) -> Vec<PathBuf> {
        let mut dirs = Vec::with_capacity(3);
        if let Some(parent) = importer.parent() {
            dirs.push(parent.to_path_buf());
        }
        dirs.push(self.project_root.clone());
        dirs.push(self.packages_dir.clone());
        dirs
    }

    /// `x`, `x.css`, `_x`, `_x.css`, with the underscore on the last
    /// component.
    fn candidates(&self, spec: &str) -> Vec<String> {
        let (parent, name) = match spec.rsplit_once('/') {
            Some((parent, name)) => (format!("{parent}/"), name),
            None => (String::new(), spec),
        };

        let mut candidates = vec![spec.to_string()];
        if !spec.ends_with(&self.extension) {
            candidates.push(format!("{spec}{}", self.extension));
        }
        if !name.starts_with('_') {
            candidates.push(format!("{parent}_{name}"));
            if !name.ends_with(&self.extension) {
                candidates.push(format!("{parent}_{name}{}", self.extension));
            }
        }
        candidates
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| name.to_string_lossy().ends_with(&self.extension))
    }

    fn lookup(&self, spec: &str, importer: &Path) -> Result<Vec<PathBuf>> {
        for dir in self.search_dirs(importer) {
            if is_glob(spec) {
                let mut set = FileSet::new(&dir);
                for candidate in self.candidates(spec) {
                    set = set.include(&candidate)?;
                }
                let files: Vec<PathBuf> =
                    set.resolve()?.into_iter().filter(|f| self.has_extension(f)).collect();
                if !files.is_empty() {
                    return Ok(files);
                }
                continue;
            }

            for candidate in self.candidates(spec) {
                let path = dir.join(&candidate);
                if path.is_file() && self.has_extension(&path) {
                    return Ok(vec![path]);
                }
            }
        }

        // An empty glob is not an error
        if is_glob(spec) {
            tracing::debug!("Import glob '{spec}' in {} matched nothing", importer.display());
            return Ok(Vec::new());
        }

        Err(SkinError::ImportNotFound {
            import: spec.to_string(),
            from: to_slash(importer.strip_prefix(&self.project_root).unwrap_or(importer)),
        }
        .into())
    }
}

impl Transform for ImportResolver {
    fn name(&self) -> &'static str {
        "import-resolver"
    }

    fn apply(&self, mut file: SourceFile) -> Result<SourceFile> {
        file.contents = self.resolve(&file.contents, file.path())?;
        Ok(file)
    }
}
