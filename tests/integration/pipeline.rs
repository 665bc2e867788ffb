//! The full `skin-tasks` composite.

use skinpack::config::SkinConfig;
use skinpack::extract::{FILEPATH_PLACEHOLDER, HEADER_TEMPLATE};
use skinpack::tasks::SKIN_TASKS;
use skinpack::test_utils::{BannerFixture, TestProject, init_test_logging};

fn scenario_config() -> SkinConfig {
    let mut config = SkinConfig::default();
    config.src.dir = "css".into();
    config.src.filename = "index.css".to_string();
    config.build.dir = "dist".into();
    config.build.filename = "style.css".to_string();
    config.extract.root = "templates".into();
    config.extract.dir = "css/_extract".into();
    config.extract.extname = ".css".to_string();
    config.tag.start = "b:skin".to_string();
    config.tag.end = "/b:skin".to_string();
    config.compile.browsers = vec!["safari 13".to_string()];
    config
}

#[tokio::test]
async fn test_end_to_end() {
    init_test_logging(None);
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_config(scenario_config())
        .with_file("templates/a.xml", "<html><head><b:skin>.foo{color:red;user-select:none}</b:skin></head></html>")
        .with_file("css/index.css", "@import \"_extract/a\";\n")
        .build()
        .unwrap();

    project.runner().unwrap().run(SKIN_TASKS).await.unwrap();

    let extracted = project.read_file("css/_extract/a.css").unwrap();
    let header = HEADER_TEMPLATE.replace(FILEPATH_PLACEHOLDER, "templates/a.xml");
    assert_eq!(extracted, format!("{header}\n.foo{{color:red;user-select:none}}"));

    let style = project.read_file("dist/style.css").unwrap();
    assert!(style.starts_with(BannerFixture::RENDERED), "{style}");
    assert!(style.contains(".foo"), "{style}");
    assert!(style.contains(".foo{color:red;-webkit-user-select: none;user-select:none}"), "{style}");
    assert!(!style.contains("Template path:"), "{style}");
    assert!(!project.file_exists("dist/index.css"));
}

#[tokio::test]
async fn test_composite_runs_phases_in_order() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_file("src/page.xml", "<b:skin>.page { margin: 0; }</b:skin>")
        .with_file(
            "node_modules/widget/widget.skinpack.xml",
            "<b:skin>.widget { padding: 0; }</b:skin>",
        )
        .with_file(
            "src/skin/skin.css",
            "@import \"_extract/page\";\n@import \"_extract/plugins/widget/widget.skinpack\";\n",
        )
        .build()
        .unwrap();

    project.runner().unwrap().run(SKIN_TASKS).await.unwrap();

    let style = project.read_file("dist/style.css").unwrap();
    let page = style.find(".page").expect("page rules are inlined");
    let widget = style.find(".widget").expect("plugin rules are inlined");
    assert!(page < widget, "{style}");
}

#[tokio::test]
async fn test_empty_project_completes() {
    let project = TestProject::builder().unwrap().build().unwrap();
    let runner = project.runner().unwrap();

    // Nothing to compile, so the banner is never needed
    runner.run(SKIN_TASKS).await.unwrap();
    assert!(!project.file_exists("dist"));
}

#[tokio::test]
async fn test_legacy_hacks_pass_lint_and_compile() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_file("src/skin/skin.css", "/* IE7 */\n.clear { *zoom: 1; _height: 1px; }\n")
        .build()
        .unwrap();

    project.runner().unwrap().run(SKIN_TASKS).await.unwrap();

    let style = project.read_file("dist/style.css").unwrap();
    assert!(style.ends_with("/* IE7 */\n.clear { *zoom: 1; _height: 1px; }\n"), "{style}");
}
