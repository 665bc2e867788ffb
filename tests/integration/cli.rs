//! The `skinpack` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use skinpack::config::CONFIG_FILE_NAME;
use skinpack::test_utils::{TemplateFixture, TestProject};

fn skinpack(project: &TestProject) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_skinpack"));
    cmd.current_dir(project.root()).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_list_prints_tasks_in_order() {
    let project = TestProject::builder().unwrap().build().unwrap();

    skinpack(&project).arg("list").assert().success().stdout(
        predicate::str::is_match(
            r"(?s)skin-extract\n.*skin-extract-plugins\n.*skin-lint\n.*skin-compile\n.*skin-tasks",
        )
        .unwrap(),
    );
}

#[test]
fn test_init_refuses_to_overwrite() {
    let project = TestProject::builder().unwrap().build().unwrap();

    skinpack(&project).arg("init").assert().success();
    assert!(project.file_exists(CONFIG_FILE_NAME));

    skinpack(&project)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    skinpack(&project).args(["init", "--force"]).assert().success();
}

#[test]
fn test_run_composite() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_file("src/home.xml", TemplateFixture::single(".home { color: red; }"))
        .with_file("src/skin/skin.css", "@import \"_extract/home\";\n")
        .build()
        .unwrap();

    skinpack(&project).args(["--no-progress", "run"]).assert().success();

    assert!(project.read_file("dist/style.css").unwrap().contains(".home"));
}

#[test]
fn test_project_dir_flag() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_file("site/src/skin/skin.css", ".site { color: red; }\n")
        .with_file("site/src/config/banner.txt", "/*! site */")
        .with_file("site/src/config/banner.json", "{}")
        .with_file("site/package.json", "{}")
        .build()
        .unwrap();

    skinpack(&project).args(["-C", "site", "--no-progress", "run", "skin-compile"]).assert().success();

    assert!(project.read_file("site/dist/style.css").unwrap().starts_with("/*! site */\n\n"));
}

#[test]
fn test_lint_failure_exits_with_report() {
    let project = TestProject::builder()
        .unwrap()
        .with_defaults()
        .with_file("src/skin/skin.css", ".a {}\n")
        .build()
        .unwrap();

    skinpack(&project)
        .args(["--no-progress", "run"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Unexpected empty block"))
        .stdout(predicate::str::contains("src/skin/skin.css"))
        .stderr(predicate::str::contains("Lint failed with 1 error(s)"));

    assert!(!project.file_exists("dist"));
}

#[test]
fn test_unknown_task() {
    let project = TestProject::builder().unwrap().build().unwrap();

    skinpack(&project)
        .args(["run", "skin-deploy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("skin-deploy"));
}

#[test]
fn test_explicit_missing_config() {
    let project = TestProject::builder().unwrap().build().unwrap();

    skinpack(&project)
        .args(["--config", "custom.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("custom.toml"));
}
