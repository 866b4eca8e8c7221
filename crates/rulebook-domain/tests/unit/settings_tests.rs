//! Unit tests for rules settings and project context

use rulebook_domain::{ProjectContext, RulesSettings};
use serde_json::json;

#[test]
fn test_rules_settings_default_is_empty() {
    let settings = RulesSettings::default();
    assert!(settings.source.is_empty());
    assert!(settings.exclude.is_empty());
    assert!(settings.include.is_empty());
    assert!(!settings.has_sources());
}

#[test]
fn test_rules_settings_deserialize_partial() {
    let settings: RulesSettings = serde_json::from_value(json!({"source": ["./rules"]})).unwrap();
    assert_eq!(settings.source, vec!["./rules"]);
    assert!(settings.exclude.is_empty());
}

#[test]
fn test_setting_dotted_lookup() {
    let context = ProjectContext::new("/project").with_settings(json!({
        "a": {"b": 42, "list": ["x", "y"]},
        "name": "demo"
    }));

    assert_eq!(context.setting("a.b"), Some(&json!(42)));
    assert_eq!(context.setting("name"), Some(&json!("demo")));
    assert_eq!(context.setting("a.list.1"), Some(&json!("y")));
}

#[test]
fn test_setting_missing_paths() {
    let context = ProjectContext::new("/project").with_settings(json!({"a": {"b": 42}}));

    assert_eq!(context.setting("a.c"), None);
    assert_eq!(context.setting("a.b.c"), None);
    assert_eq!(context.setting("missing"), None);
}

#[test]
fn test_setting_empty_path_is_whole_tree() {
    let tree = json!({"a": 1});
    let context = ProjectContext::new("/project").with_settings(tree.clone());
    assert_eq!(context.setting(""), Some(&tree));
}
