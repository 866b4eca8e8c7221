//! Serialized rule call
//!
//! The runtime never builds program text out of rule data. Everything it needs
//! to import and call a rule travels as this JSON document.

use crate::entities::Rule;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One rule call: where to import from, what to call, and with which arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleInvocation {
    /// Rule identifier, for reporting
    pub rule_id: String,
    /// Directory prepended to the interpreter's module search path
    pub module_dir: PathBuf,
    /// Module to import (rule file stem)
    pub module: String,
    /// Function to call
    pub function: String,
    /// Keyword arguments
    pub kwargs: serde_json::Map<String, serde_json::Value>,
}

impl RuleInvocation {
    /// Build the invocation of `rule` with already-resolved arguments
    pub fn for_rule(rule: &Rule, kwargs: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let module = rule.module_name().ok_or_else(|| {
            Error::execution(
                &rule.id,
                format!("cannot derive module name from {}", rule.location.display()),
            )
        })?;
        let module_dir = rule.module_dir().ok_or_else(|| {
            Error::execution(
                &rule.id,
                format!("rule location {} has no parent", rule.location.display()),
            )
        })?;

        Ok(Self {
            rule_id: rule.id.clone(),
            module_dir: module_dir.to_path_buf(),
            module: module.to_string(),
            function: rule.function.clone(),
            kwargs,
        })
    }

    /// Encode as the JSON payload read by the runtime bootstrap
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
