//! Command wiring tests

use rulebook::Rulebook;
use rulebook::infrastructure::{ConfigLoader, LocalSourceSync};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RULE: &str = r#"
def readme(*, project_dir=None):
    """README must exist.
    :key docs.readme
    """


def tabs():
    """No tabs.
    :key legacy.tabs
    """
"#;

/// Project with a config pointing the config root into `root`
fn project(root: &Path) -> TempDir {
    let project = TempDir::new().unwrap();
    fs::create_dir_all(project.path().join("rules/docs-ruleset")).unwrap();
    fs::write(project.path().join("rules/docs-ruleset/checks.py"), RULE).unwrap();
    fs::write(
        project.path().join("rulebook.toml"),
        format!(
            "[rules]\nsource = [\"./rules\"]\nexclude = [\"legacy*\"]\n\n[paths]\nconfig_root = {:?}\n",
            root.to_string_lossy()
        ),
    )
    .unwrap();
    project
}

fn open(project: &Path) -> Rulebook {
    let loaded = ConfigLoader::new()
        .without_user_config()
        .with_project_dir(project)
        .with_env_prefix("RULEBOOK_UNIT_TEST_NO_SUCH_PREFIX")
        .load()
        .unwrap();
    Rulebook::from_loaded(loaded, project).unwrap()
}

#[test]
fn test_config_root_comes_from_configuration() {
    let root = TempDir::new().unwrap();
    let project = project(root.path());
    let rulebook = open(project.path());

    assert_eq!(rulebook.paths().root(), root.path());
    assert_eq!(rulebook.sources(), ["./rules".to_string()]);
}

#[test]
fn test_list_is_empty_before_sync() {
    let root = TempDir::new().unwrap();
    let project = project(root.path());

    assert!(open(project.path()).list().unwrap().is_empty());
}

#[test]
fn test_list_after_sync_applies_filter() {
    let root = TempDir::new().unwrap();
    let project = project(root.path());
    let rulebook = open(project.path());

    LocalSourceSync::new(rulebook.paths().clone(), project.path())
        .sync_all(rulebook.sources())
        .unwrap();
    let rules = rulebook.list().unwrap();

    let states: Vec<(&str, bool)> = rules.iter().map(|r| (r.id.as_str(), r.excluded)).collect();
    assert_eq!(states, vec![("docs.readme", false), ("legacy.tabs", true)]);
}

#[tokio::test]
async fn test_apply_without_rules_runs_nothing() {
    let root = TempDir::new().unwrap();
    let project = project(root.path());

    let report = open(project.path()).apply().await.unwrap();

    assert!(report.is_none());
    assert!(!root.path().join("rules-venv").exists());
}
