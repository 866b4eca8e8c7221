//! Shared test utilities for rulebook-application tests

#![allow(dead_code)] // Test utilities may not all be used in every test file

use async_trait::async_trait;
use rulebook_domain::ports::RuleRuntime;
use rulebook_domain::{Error, Result, Rule, RuleInvocation};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Build a rule descriptor with the given keyword-only defaults
pub fn rule(id: &str, parameters: &[(&str, Value)]) -> Rule {
    Rule {
        id: id.to_string(),
        description: format!("{id} description\nmore detail"),
        ruleset: "test".to_string(),
        location: PathBuf::from(format!("/cache/abc/test-ruleset/{}.py", id.replace('.', "_"))),
        function: format!("check_{}", id.replace('.', "_")),
        excluded: false,
        parameters: parameters
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Same as [`rule`] but excluded by the filter
pub fn excluded_rule(id: &str) -> Rule {
    Rule {
        excluded: true,
        ..rule(id, &[])
    }
}

/// Calls observed by [`RecordingRuntime`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Provision(Vec<String>),
    Install(String),
    Invoke(RuleInvocation),
}

/// Runtime double that records every call and fails on demand
#[derive(Default)]
pub struct RecordingRuntime {
    calls: Mutex<Vec<Call>>,
    failing_rule: Option<String>,
    fail_provision: bool,
}

impl RecordingRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the invocation of `rule_id`
    pub fn failing_on(rule_id: &str) -> Self {
        Self {
            failing_rule: Some(rule_id.to_string()),
            ..Self::default()
        }
    }

    /// Fail provisioning
    pub fn failing_provision() -> Self {
        Self {
            fail_provision: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn invoked_ids(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Invoke(invocation) => Some(invocation.rule_id),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl RuleRuntime for RecordingRuntime {
    async fn provision(&self, sources: &[String]) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Provision(sources.to_vec()));
        if self.fail_provision {
            return Err(Error::provisioning("venv creation failed"));
        }
        Ok(())
    }

    async fn install_dependencies(&self, source: &str) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Install(source.to_string()));
        Ok(())
    }

    async fn invoke(&self, invocation: &RuleInvocation) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Invoke(invocation.clone()));
        if self.failing_rule.as_deref() == Some(invocation.rule_id.as_str()) {
            return Err(Error::execution(&invocation.rule_id, "exit status: 1"));
        }
        Ok(())
    }
}
