//! Argument resolution
//!
//! Order matters: declared defaults are resolved first (`settings:` lookups),
//! then `project_dir` and `meta` are merged over them, then everything the
//! rule does not declare is dropped.

use rulebook_domain::constants::{META_PARAM, PROJECT_DIR_PARAM, SETTINGS_PREFIX};
use rulebook_domain::{Error, ProjectContext, Result, Rule};
use serde_json::{Map, Value};

/// Compute the keyword arguments passed to `rule`
pub fn resolve_arguments(rule: &Rule, context: &ProjectContext) -> Result<Map<String, Value>> {
    let mut arguments = Map::new();
    for (name, default) in &rule.parameters {
        arguments.insert(name.clone(), resolve_default(rule, default, context)?);
    }

    let implicit = [
        (
            PROJECT_DIR_PARAM,
            Value::String(context.working_dir.to_string_lossy().into_owned()),
        ),
        (META_PARAM, Value::Object(context.meta.clone())),
    ];
    for (name, value) in implicit {
        if rule.declares(name) {
            arguments.insert(name.to_string(), value);
        }
    }

    Ok(arguments)
}

fn resolve_default(rule: &Rule, default: &Value, context: &ProjectContext) -> Result<Value> {
    let Some(path) = default.as_str().and_then(|s| s.strip_prefix(SETTINGS_PREFIX)) else {
        return Ok(default.clone());
    };
    context
        .setting(path)
        .cloned()
        .ok_or_else(|| Error::SettingNotFound {
            path: path.to_string(),
            rule_id: rule.id.clone(),
        })
}
