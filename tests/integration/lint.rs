//! Stylesheet linting and lint gating.

use skinpack::core::SkinError;
use skinpack::lint::Severity;
use skinpack::tasks::{SKIN_LINT, SKIN_TASKS};
use skinpack::test_utils::{LintFixture, TestProject};

#[tokio::test]
async fn test_error_finding_fails_lint() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_file("src/skin/skin.css", ".a {}\n")
        .build()
        .unwrap();

    let err = project.runner().unwrap().run(SKIN_LINT).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SkinError>(),
        Some(SkinError::LintFailed {
            errors: 1,
            warnings: 0
        })
    ));
}

#[tokio::test]
async fn test_lint_gates_compile() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_file("src/skin/skin.css", ".a { color: #12; }\n")
        .build()
        .unwrap();

    let err = project.runner().unwrap().run(SKIN_TASKS).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<SkinError>(), Some(SkinError::LintFailed { .. })));
    assert!(!project.file_exists("dist"));
}

#[tokio::test]
async fn test_warnings_do_not_fail() {
    let project = TestProject::builder()
        .unwrap()
        .with_fixture(LintFixture::warnings_only())
        .with_file("src/skin/skin.css", ".a {}\n/* */\n")
        .build()
        .unwrap();

    let options = project.options().unwrap();
    let report = skinpack::lint::run(&options.lint, project.root()).await.unwrap();
    assert_eq!(report.errors(), 0);
    assert_eq!(report.warnings(), 2);
    assert!(
        report.files[0].findings.iter().all(|f| f.severity == Severity::Warning),
        "{:?}",
        report.files[0].findings
    );
}

#[tokio::test]
async fn test_suppression_directives_are_honored() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_file(
            "src/skin/skin.css",
            "/* stylelint-disable-next-line block-no-empty */\n.a {}\n\n.b { color: red; } /* stylelint-disable-line */\n",
        )
        .build()
        .unwrap();

    project.runner().unwrap().run(SKIN_LINT).await.unwrap();
}

#[tokio::test]
async fn test_extract_and_build_trees_are_not_linted() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_file("src/skin/_extract/layout.css", ".broken {}\n")
        .with_file("dist/style.css", ".broken {}\n")
        .with_file("src/skin/skin.css", ".ok { color: red; }\n")
        .with_config({
            let mut config = skinpack::config::SkinConfig::default();
            config.build.dir = "src/skin/dist".into();
            config
        })
        .build()
        .unwrap();
    project.write_file("src/skin/dist/style.css", ".broken {}\n").unwrap();

    let options = project.options().unwrap();
    let report = skinpack::lint::run(&options.lint, project.root()).await.unwrap();
    assert_eq!(report.file_count(), 1);
    assert!(report.is_clean());
}

#[tokio::test]
async fn test_no_stylesheets_needs_no_config() {
    let project = TestProject::builder().unwrap().build().unwrap();
    project.runner().unwrap().run(SKIN_LINT).await.unwrap();
}

#[tokio::test]
async fn test_missing_config_is_a_configuration_error() {
    let project = TestProject::builder()
        .unwrap()
        .with_file("src/skin/skin.css", ".a { color: red; }\n")
        .build()
        .unwrap();

    let err = project.runner().unwrap().run(SKIN_LINT).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<SkinError>(), Some(SkinError::ConfigError { .. })));
}
