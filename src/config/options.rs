//! Configuration resolved against a project root.
//!
//! [`SkinOptions`] is built once, when the tasks are registered, and shared
//! read-only by every action through an `Arc`.

use anyhow::Result;
use glob::Pattern;
use std::path::{Path, PathBuf};

use super::SkinConfig;
use crate::pattern::FileSet;
use crate::utils::fs::absolutize;

/// Subdirectory of the extract directory receiving package-sourced skins.
pub const PLUGINS_SUBDIR: &str = "plugins";

/// Inputs of one extract action.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Template documents to scan
    pub sources: FileSet,
    /// Destination root for the extracted stylesheets
    pub dest: PathBuf,
    /// Extension given to extracted files
    pub extname: String,
    /// Start tag token
    pub tag_start: String,
    /// End tag token
    pub tag_end: String,
    /// Maximum number of templates processed at once
    pub concurrency: Option<usize>,
}

/// Inputs of the lint action.
#[derive(Debug, Clone)]
pub struct LintOptions {
    /// Stylesheets to lint
    pub sources: FileSet,
    /// Linter configuration file
    pub config_file: PathBuf,
}

/// Inputs of the compile action.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Primary entry file plus its variants
    pub sources: FileSet,
    /// Output directory
    pub dest: PathBuf,
    /// Primary entry basename without extension, e.g. `skin`
    pub src_name: String,
    /// Primary entry extension with the dot, e.g. `.css`
    pub src_ext: String,
    /// Output basename without extension, e.g. `style`
    pub build_name: String,
    /// Output extension with the dot
    pub build_ext: String,
    /// Banner template text
    pub banner_file: PathBuf,
    /// JSON exposed to the banner as `data`
    pub banner_data_file: PathBuf,
    /// JSON exposed to the banner as `pkg`
    pub package_file: PathBuf,
    /// Browserslist queries for vendor prefixing
    pub browsers: Vec<String>,
    /// Last-resort lookup directory for `@import`
    pub packages_dir: PathBuf,
    /// Maximum number of files compiled at once
    pub concurrency: Option<usize>,
}

/// Every path of a [`SkinConfig`] made absolute, grouped per action.
#[derive(Debug, Clone)]
pub struct SkinOptions {
    /// Project root all relative paths were resolved against
    pub project_root: PathBuf,
    /// Project template scan
    pub extract: ExtractOptions,
    /// Installed-package template scan
    pub extract_plugins: ExtractOptions,
    /// Stylesheet lint
    pub lint: LintOptions,
    /// Stylesheet compile
    pub compile: CompileOptions,
}

/// Splits `skin.css` into (`skin`, `.css`).
fn split_file_name(name: &str) -> (String, String) {
    let path = Path::new(name);
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let ext = path.extension().map(|e| format!(".{}", e.to_string_lossy())).unwrap_or_default();
    (stem, ext)
}

impl SkinOptions {
    /// Resolves `config` against `project_root`.
    ///
    /// Nothing is read from or written to disk.
    pub fn resolve(config: &SkinConfig, project_root: &Path) -> Result<Self> {
        let root = absolutize(&std::env::current_dir().unwrap_or_default(), project_root);
        let at = |path: &Path| absolutize(&root, path);

        let src_dir = at(&config.src.dir);
        let build_dir = at(&config.build.dir);
        let extract_root = at(&config.extract.root);
        let extract_dir = at(&config.extract.dir);
        let packages_dir = at(&config.extract.packages_dir);

        let extract = ExtractOptions {
            sources: FileSet::new(&extract_root).include("**/*.xml")?.exclude_dir(&packages_dir),
            dest: extract_dir.clone(),
            extname: config.extract.extname.clone(),
            tag_start: config.tag.start.clone(),
            tag_end: config.tag.end.clone(),
            concurrency: config.pipeline.concurrency,
        };

        let extract_plugins = ExtractOptions {
            sources: FileSet::new(&packages_dir).include(&config.extract.plugin_pattern)?,
            dest: extract_dir.join(PLUGINS_SUBDIR),
            ..extract.clone()
        };

        // extract.dir and build.dir are usually nested inside src.dir
        let lint = LintOptions {
            sources: FileSet::new(&src_dir)
                .include("**/*.css")?
                .exclude_dir(&extract_dir)
                .exclude_dir(src_dir.join(&config.extract.dir))
                .exclude_dir(&build_dir)
                .exclude_dir(src_dir.join(&config.build.dir)),
            config_file: at(&config.files.lint),
        };

        let (src_name, src_ext) = split_file_name(&config.src.filename);
        let (build_name, build_ext) = split_file_name(&config.build.filename);
        let variants =
            format!("{}-*{}", Pattern::escape(&src_name), Pattern::escape(&src_ext));

        let compile = CompileOptions {
            sources: FileSet::new(&src_dir)
                .include(&Pattern::escape(&config.src.filename))?
                .include(&variants)?,
            dest: build_dir,
            src_name,
            src_ext,
            build_name,
            build_ext,
            banner_file: at(&config.files.banner),
            banner_data_file: at(&config.files.banner_data),
            package_file: at(&config.files.package),
            browsers: config.compile.browsers.clone(),
            packages_dir,
            concurrency: config.pipeline.concurrency,
        };

        Ok(Self {
            project_root: root,
            extract,
            extract_plugins,
            lint,
            compile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_file_name() {
        assert_eq!(split_file_name("skin.css"), ("skin".to_string(), ".css".to_string()));
        assert_eq!(split_file_name("theme.min.css"), ("theme.min".to_string(), ".css".to_string()));
        assert_eq!(split_file_name("noext"), ("noext".to_string(), String::new()));
    }

    #[test]
    fn test_resolve_defaults() {
        let root = Path::new("/project");
        let options = SkinOptions::resolve(&SkinConfig::default(), root).unwrap();

        assert_eq!(options.project_root, PathBuf::from("/project"));
        assert_eq!(options.extract.sources.base(), Path::new("/project/src"));
        assert_eq!(options.extract.dest, PathBuf::from("/project/src/skin/_extract"));
        assert_eq!(options.extract_plugins.sources.base(), Path::new("/project/node_modules"));
        assert_eq!(options.extract_plugins.dest, PathBuf::from("/project/src/skin/_extract/plugins"));
        assert_eq!(options.lint.config_file, PathBuf::from("/project/.stylelintrc.json"));

        let compile = &options.compile;
        assert_eq!(compile.sources.patterns(), vec!["skin.css", "skin-*.css"]);
        assert_eq!(compile.dest, PathBuf::from("/project/dist"));
        assert_eq!(compile.src_name, "skin");
        assert_eq!(compile.build_name, "style");
        assert_eq!(compile.build_ext, ".css");
        assert_eq!(compile.banner_file, PathBuf::from("/project/src/config/banner.txt"));
    }

    #[test]
    fn test_resolve_escapes_glob_characters() {
        let mut config = SkinConfig::default();
        config.src.filename = "skin[1].css".to_string();
        let options = SkinOptions::resolve(&config, Path::new("/project")).unwrap();
        assert_eq!(options.compile.sources.patterns(), vec!["skin[[]1[]].css", "skin[[]1[]]-*.css"]);
    }

    #[test]
    fn test_pipeline_concurrency_applies_to_every_action() {
        let mut config = SkinConfig::default();
        config.pipeline.concurrency = Some(3);
        let options = SkinOptions::resolve(&config, Path::new("/project")).unwrap();

        assert_eq!(options.extract.concurrency, Some(3));
        assert_eq!(options.extract_plugins.concurrency, Some(3));
        assert_eq!(options.compile.concurrency, Some(3));
    }
}
