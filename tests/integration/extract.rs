//! Extraction of embedded skin regions from template documents.

use skinpack::extract::{EMPTY_MESSAGE, FILEPATH_PLACEHOLDER, HEADER_TEMPLATE};
use skinpack::tasks::{SKIN_EXTRACT, SKIN_EXTRACT_PLUGINS};
use skinpack::test_utils::{TemplateFixture, TestProject, init_test_logging};

fn header(path: &str) -> String {
    HEADER_TEMPLATE.replace(FILEPATH_PLACEHOLDER, path)
}

#[tokio::test]
async fn test_extract_mirrors_template_tree() {
    init_test_logging(None);
    let project = TestProject::builder()
        .unwrap()
        .with_file("src/layout.xml", "<html><b:skin>.a{color:red}</b:skin><b:skin>.b{}</b:skin></html>")
        .with_file("src/widgets/empty.xml", TemplateFixture::empty())
        .with_file("src/notes.txt", "<b:skin>.ignored{}</b:skin>")
        .build()
        .unwrap();

    project.runner().unwrap().run(SKIN_EXTRACT).await.unwrap();

    let layout = project.read_file("src/skin/_extract/layout.css").unwrap();
    let header = header("src/layout.xml");
    assert_eq!(layout, format!("{header}\n.a{{color:red}}\n\n{header}\n.b{{}}"));

    let empty = project.read_file("src/skin/_extract/widgets/empty.css").unwrap();
    assert_eq!(empty, EMPTY_MESSAGE);

    assert!(!project.file_exists("src/skin/_extract/notes.css"));
}

#[tokio::test]
async fn test_extract_is_idempotent() {
    let project = TestProject::builder()
        .unwrap()
        .with_file("src/post.xml", TemplateFixture::single(".post { margin: 0; }"))
        .build()
        .unwrap();
    let runner = project.runner().unwrap();

    runner.run(SKIN_EXTRACT).await.unwrap();
    let first = std::fs::read(project.path("src/skin/_extract/post.css")).unwrap();

    runner.run(SKIN_EXTRACT).await.unwrap();
    let second = std::fs::read(project.path("src/skin/_extract/post.css")).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_extract_skips_packages_and_plugins_extract_them() {
    let project = TestProject::builder()
        .unwrap()
        .with_file("src/index.xml", TemplateFixture::single(".home {}"))
        .with_file("node_modules/gallery/gallery.skinpack.xml", TemplateFixture::single(".gallery {}"))
        .with_file("node_modules/gallery/other.xml", TemplateFixture::single(".other {}"))
        .build()
        .unwrap();
    let runner = project.runner().unwrap();

    runner.run(SKIN_EXTRACT).await.unwrap();
    assert!(project.file_exists("src/skin/_extract/index.css"));
    assert!(!project.file_exists("src/skin/_extract/plugins"));

    runner.run(SKIN_EXTRACT_PLUGINS).await.unwrap();
    let gallery = project.read_file("src/skin/_extract/plugins/gallery/gallery.skinpack.css").unwrap();
    assert!(gallery.contains("Template path: node_modules/gallery/gallery.skinpack.xml"));
    assert!(gallery.contains(".gallery {}"));
    assert!(!project.file_exists("src/skin/_extract/plugins/gallery/other.css"));
}

#[tokio::test]
async fn test_extract_without_templates_is_a_no_op() {
    let project = TestProject::builder().unwrap().build().unwrap();
    let runner = project.runner().unwrap();

    runner.run(SKIN_EXTRACT).await.unwrap();
    runner.run(SKIN_EXTRACT_PLUGINS).await.unwrap();

    assert!(!project.file_exists("src/skin/_extract"));
}

#[tokio::test]
async fn test_stale_extracted_files_are_kept() {
    let project = TestProject::builder()
        .unwrap()
        .with_file("src/old.xml", TemplateFixture::single(".old {}"))
        .build()
        .unwrap();
    let runner = project.runner().unwrap();

    runner.run(SKIN_EXTRACT).await.unwrap();
    std::fs::remove_file(project.path("src/old.xml")).unwrap();
    runner.run(SKIN_EXTRACT).await.unwrap();

    assert!(project.read_file("src/skin/_extract/old.css").unwrap().contains(".old {}"));
}
