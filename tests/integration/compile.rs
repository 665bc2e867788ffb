//! Stylesheet compilation.

use skinpack::config::SkinConfig;
use skinpack::core::SkinError;
use skinpack::extract::EMPTY_MESSAGE;
use skinpack::tasks::{SKIN_COMPILE, SKIN_EXTRACT};
use skinpack::test_utils::{BannerFixture, TemplateFixture, TestProject};

fn index_config(src_filename: &str) -> SkinConfig {
    let mut config = SkinConfig::default();
    config.src.dir = "css".into();
    config.src.filename = src_filename.to_string();
    config.build.dir = "dist".into();
    config.build.filename = "style.css".to_string();
    config
}

#[tokio::test]
async fn test_rename_law() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_config(index_config("index.css"))
        .with_file("css/index.css", ".main { color: red; }\n")
        .with_file("css/index-dark.css", ".dark { color: black; }\n")
        .with_file("css/other.css", ".other { color: blue; }\n")
        .build()
        .unwrap();

    project.runner().unwrap().run(SKIN_COMPILE).await.unwrap();

    let mut outputs: Vec<String> = std::fs::read_dir(project.path("dist"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    outputs.sort();
    assert_eq!(outputs, vec!["style-dark.css", "style.css"]);

    assert!(project.read_file("dist/style.css").unwrap().contains(".main"));
    assert!(project.read_file("dist/style-dark.css").unwrap().contains(".dark"));
}

#[tokio::test]
async fn test_build_extension_always_applied() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_config(index_config("index.scss"))
        .with_file("css/index.scss", "@import \"partials/grid\";\n.main { color: red; }\n")
        .with_file("css/partials/_grid.scss", ".grid { display: grid; }\n")
        .with_file("css/index-print.scss", ".print { color: black; }\n")
        .build()
        .unwrap();

    project.runner().unwrap().run(SKIN_COMPILE).await.unwrap();

    let main = project.read_file("dist/style.css").unwrap();
    assert!(main.contains(".grid"), "{main}");
    assert!(project.file_exists("dist/style-print.css"));
    assert!(!project.file_exists("dist/style.scss"));
}

#[tokio::test]
async fn test_every_output_starts_with_banner() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_file("src/skin/skin.css", "\n\n.a { color: red; }\n\n\n")
        .with_file("src/skin/skin-alt.css", "/*! keep */\n.alt { color: red; }\n")
        .build()
        .unwrap();

    project.runner().unwrap().run(SKIN_COMPILE).await.unwrap();

    for output in ["dist/style.css", "dist/style-alt.css"] {
        let text = project.read_file(output).unwrap();
        assert!(text.starts_with(BannerFixture::RENDERED), "{output}: {text}");
        assert!(!text.ends_with("\n\n"), "{output}: {text:?}");
    }
}

#[tokio::test]
async fn test_extraction_markers_never_survive_compile() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_file("src/layout.xml", TemplateFixture::single("/* Layout section */\n.layout { color: red; }"))
        .with_file("src/widgets/blank.xml", TemplateFixture::empty())
        .with_file(
            "src/skin/skin.css",
            "/* <Variable name=\"main.color\" type=\"color\"/> */\n@import \"_extract/**/*.css\";\n.main { color: blue; }\n",
        )
        .build()
        .unwrap();
    let runner = project.runner().unwrap();

    runner.run(SKIN_EXTRACT).await.unwrap();
    assert_eq!(project.read_file("src/skin/_extract/widgets/blank.css").unwrap(), EMPTY_MESSAGE);

    runner.run(SKIN_COMPILE).await.unwrap();
    let style = project.read_file("dist/style.css").unwrap();

    assert!(style.contains(".layout"), "{style}");
    assert!(style.find(".layout").unwrap() < style.find(".main").unwrap());
    assert!(!style.contains("Template path:"), "{style}");
    assert!(!style.contains(EMPTY_MESSAGE), "{style}");
    assert!(!style.contains("-------"), "{style}");

    // Comments that are not extraction markers are kept in place
    let variable = style.find("/* <Variable name=\"main.color\" type=\"color\"/> */").expect("variable comment kept");
    let section = style.find("/* Layout section */").expect("section comment kept");
    assert!(variable < section && section < style.find(".layout").unwrap(), "{style}");
}

#[tokio::test]
async fn test_hacks_and_values_survive_compile() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_file(
            "src/skin/skin.css",
            "/* Clearfix */\n.clear { *zoom: 1; _height: 1px; margin-top: 0px; color: #ff0000; }\n",
        )
        .build()
        .unwrap();

    project.runner().unwrap().run(SKIN_COMPILE).await.unwrap();

    let style = project.read_file("dist/style.css").unwrap();
    assert_eq!(
        style,
        format!(
            "{}/* Clearfix */\n.clear {{ *zoom: 1; _height: 1px; margin-top: 0px; color: #ff0000; }}\n",
            BannerFixture::RENDERED
        )
    );
}

#[tokio::test]
async fn test_vendor_prefixes_follow_browsers() {
    let mut config = SkinConfig::default();
    config.compile.browsers = vec!["safari 13".to_string()];

    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_config(config)
        .with_file("src/skin/skin.css", ".a { user-select: none; }\n")
        .build()
        .unwrap();

    project.runner().unwrap().run(SKIN_COMPILE).await.unwrap();

    let style = project.read_file("dist/style.css").unwrap();
    assert!(style.contains("-webkit-user-select: none"), "{style}");
}

#[tokio::test]
async fn test_missing_import_fails_compile() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_file("src/skin/skin.css", "@import \"missing\";\n")
        .build()
        .unwrap();

    let err = project.runner().unwrap().run(SKIN_COMPILE).await.unwrap_err();
    let import_error = err.chain().find_map(|cause| cause.downcast_ref::<SkinError>());
    assert!(
        matches!(import_error, Some(SkinError::ImportNotFound { import, from }) if import == "missing" && from == "src/skin/skin.css"),
        "{err:#}"
    );
    assert!(!project.file_exists("dist/style.css"));
}

#[tokio::test]
async fn test_missing_banner_is_a_banner_error() {
    let project = TestProject::builder()
        .unwrap()
        .with_file("src/skin/skin.css", ".a { color: red; }\n")
        .build()
        .unwrap();

    let err = project.runner().unwrap().run(SKIN_COMPILE).await.unwrap_err();
    let cause = err.chain().find_map(|cause| cause.downcast_ref::<SkinError>());
    assert!(matches!(cause, Some(SkinError::BannerError { .. })), "{err:#}");
}
