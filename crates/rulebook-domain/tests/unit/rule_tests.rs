//! Unit tests for the rule descriptor and catalog

use rulebook_domain::{Rule, RuleCatalog};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn rule(id: &str, ruleset: &str, excluded: bool) -> Rule {
    Rule {
        id: id.to_string(),
        description: "Checks things\nin detail".to_string(),
        ruleset: ruleset.to_string(),
        location: PathBuf::from(format!("/cache/{ruleset}-ruleset/checks.py")),
        function: "check".to_string(),
        excluded,
        parameters: BTreeMap::from([("level".to_string(), json!(3))]),
    }
}

#[test]
fn test_rule_module_helpers() {
    let rule = rule("a", "base", false);
    assert_eq!(rule.module_name(), Some("checks"));
    assert_eq!(
        rule.module_dir(),
        Some(PathBuf::from("/cache/base-ruleset").as_path())
    );
    assert_eq!(rule.summary(), "Checks things");
    assert!(rule.declares("level"));
    assert!(!rule.declares("project_dir"));
}

#[test]
fn test_rule_enabled_mirrors_excluded() {
    assert!(rule("a", "base", false).is_enabled());
    assert!(!rule("a", "base", true).is_enabled());
}

#[test]
fn test_catalog_enabled_preserves_order() {
    let catalog = RuleCatalog::new(vec![
        rule("a", "base", false),
        rule("b", "base", true),
        rule("c", "extra", false),
    ]);
    let ids: Vec<&str> = catalog.enabled().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(catalog.len(), 3);
}

#[test]
fn test_catalog_duplicate_id_shadows() {
    let catalog = RuleCatalog::new(vec![rule("dup", "first", false), rule("dup", "second", false)]);

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.by_id("dup").map(|r| r.ruleset.as_str()), Some("second"));
    assert_eq!(catalog.duplicate_ids(), vec!["dup"]);
}

#[test]
fn test_empty_catalog() {
    let catalog = RuleCatalog::default();
    assert!(catalog.is_empty());
    assert!(catalog.by_id("anything").is_none());
    assert!(catalog.duplicate_ids().is_empty());
}
