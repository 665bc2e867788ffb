//! Sample project files for tests.

/// A file a fixture writes into the project.
#[derive(Clone, Debug)]
pub struct FileFixture {
    /// Path relative to the project root
    pub path: &'static str,
    pub content: String,
}

impl FileFixture {
    pub fn new(path: &'static str, content: impl Into<String>) -> Self {
        Self {
            path,
            content: content.into(),
        }
    }
}

/// Banner template, banner data and package metadata at the default paths.
#[derive(Clone, Debug)]
pub struct BannerFixture;

impl BannerFixture {
    pub const TEMPLATE: &'static str = "
        /*!
         * {{ pkg.name }} v{{ pkg.version }}
         * {{ data.copyright }}
         */
    ";

    /// What [`Self::TEMPLATE`] renders to with the default data.
    pub const RENDERED: &'static str = "/*!\n * demo-skin v1.2.3\n * (c) Demo\n */\n\n";

    pub fn files() -> Vec<FileFixture> {
        vec![
            FileFixture::new("src/config/banner.txt", Self::TEMPLATE),
            FileFixture::new("src/config/banner.json", r#"{ "copyright": "(c) Demo" }"#),
            FileFixture::new("package.json", r#"{ "name": "demo-skin", "version": "1.2.3" }"#),
        ]
    }
}

/// Lint configurations at the default path.
#[derive(Clone, Debug)]
pub struct LintFixture;

impl LintFixture {
    pub const PATH: &'static str = ".stylelintrc.json";

    /// Every rule at error severity.
    pub fn strict() -> FileFixture {
        FileFixture::new(
            Self::PATH,
            r#"{
  "rules": {
    "block-no-empty": true,
    "color-no-invalid-hex": true,
    "comment-no-empty": true,
    "declaration-block-no-duplicate-properties": true,
    "no-empty-source": true
  }
}"#,
        )
    }

    /// Every rule reported as a warning.
    pub fn warnings_only() -> FileFixture {
        FileFixture::new(
            Self::PATH,
            r#"{
  "defaultSeverity": "warning",
  "rules": {
    "block-no-empty": true,
    "color-no-invalid-hex": true,
    "comment-no-empty": true,
    "declaration-block-no-duplicate-properties": true
  }
}"#,
        )
    }
}

/// Template documents with embedded skin regions.
#[derive(Clone, Debug)]
pub struct TemplateFixture;

impl TemplateFixture {
    /// One region with a single rule.
    pub fn single(css: &str) -> String {
        format!(
            "<?xml version=\"1.0\"?>\n<html>\n<head>\n<b:skin><![CDATA[\n{css}\n]]></b:skin>\n</head>\n<body/>\n</html>\n"
        )
    }

    /// A document without any region.
    pub fn empty() -> String {
        "<?xml version=\"1.0\"?>\n<html><body/></html>\n".to_string()
    }
}
