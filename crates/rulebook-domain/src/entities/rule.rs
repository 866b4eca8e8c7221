//! Rule descriptor entity
//!
//! A [`Rule`] is produced by static discovery and describes one rule function:
//! where it lives, how to call it, whether the execution filter enabled it and
//! which keyword-only parameters it declares.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Descriptor of one discovered rule function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Identifier declared by the `:key` docstring directive
    pub id: String,
    /// Docstring body without directive lines
    pub description: String,
    /// Owning ruleset (directory name without the `-ruleset` suffix)
    pub ruleset: String,
    /// Absolute path of the defining source file
    pub location: PathBuf,
    /// Name of the function to invoke
    pub function: String,
    /// Set at discovery time by the execution filter; never recomputed
    pub excluded: bool,
    /// Keyword-only parameter names mapped to their declared defaults (`null` when absent)
    pub parameters: BTreeMap<String, serde_json::Value>,
}

impl Rule {
    /// True when the execution filter left this rule enabled
    pub fn is_enabled(&self) -> bool {
        !self.excluded
    }

    /// Module name used to import the rule (file stem of `location`)
    pub fn module_name(&self) -> Option<&str> {
        self.location.file_stem().and_then(|stem| stem.to_str())
    }

    /// Directory that must be on the interpreter's module search path
    pub fn module_dir(&self) -> Option<&Path> {
        self.location.parent()
    }

    /// First description line, for progress and listings
    pub fn summary(&self) -> &str {
        self.description.lines().next().unwrap_or_default()
    }

    /// Whether the rule's signature declares `name` as a keyword-only parameter
    pub fn declares(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }
}

/// Ordered result of one discovery run with keyed lookup
///
/// Identifiers are not unique across rulesets. Lookup by id returns the
/// last-discovered rule, shadowing earlier ones.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
    index: HashMap<String, usize>,
}

impl RuleCatalog {
    /// Build a catalog, logging every shadowed identifier
    pub fn new(rules: Vec<Rule>) -> Self {
        let mut index = HashMap::with_capacity(rules.len());
        for (position, rule) in rules.iter().enumerate() {
            if let Some(previous) = index.insert(rule.id.clone(), position) {
                let shadowed: &Rule = &rules[previous];
                warn!(
                    rule_id = %rule.id,
                    shadowed_ruleset = %shadowed.ruleset,
                    ruleset = %rule.ruleset,
                    "Duplicate rule id; later definition shadows earlier one"
                );
            }
        }
        Self { rules, index }
    }

    /// All rules in discovery order, duplicates included
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules not excluded by the execution filter, in discovery order
    pub fn enabled(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|rule| rule.is_enabled())
    }

    /// Look up a rule by id (last definition wins)
    pub fn by_id(&self, id: &str) -> Option<&Rule> {
        self.index.get(id).map(|&position| &self.rules[position])
    }

    /// Identifiers defined more than once in this run
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = self
            .index
            .keys()
            .filter(|id| self.rules.iter().filter(|r| &r.id == *id).count() > 1)
            .map(String::as_str)
            .collect();
        duplicates.sort_unstable();
        duplicates
    }

    /// Number of rules, duplicates included
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when discovery produced nothing
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<Rule>> for RuleCatalog {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}
