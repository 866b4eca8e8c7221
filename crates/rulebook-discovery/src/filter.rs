//! Execution filter
//!
//! Patterns are glob-like: `*` matches any substring, everything else is
//! literal. Matching is anchored at the start of the id only, so `style`
//! matches `style.imports` as well.
//!
//! A rule is enabled when no exclude pattern matches it, or when any include
//! pattern does. Include only ever reinstates; it never restricts.

use regex::{Regex, RegexSet};
use rulebook_domain::RulesSettings;

use crate::{DiscoveryError, Result};

/// Compiled exclude/include pattern sets
#[derive(Debug, Clone)]
pub struct ExecutionFilter {
    exclude: RegexSet,
    include: RegexSet,
}

impl ExecutionFilter {
    /// Compile exclude and include pattern lists
    pub fn new<S: AsRef<str>>(exclude: &[S], include: &[S]) -> Result<Self> {
        Ok(Self {
            exclude: compile_set(exclude)?,
            include: compile_set(include)?,
        })
    }

    /// Filter built from the `[rules]` configuration section
    pub fn from_settings(settings: &RulesSettings) -> Result<Self> {
        Self::new(settings.exclude.as_slice(), settings.include.as_slice())
    }

    /// Filter that enables every id
    pub fn allow_all() -> Self {
        Self {
            exclude: RegexSet::empty(),
            include: RegexSet::empty(),
        }
    }

    /// Decide whether a rule id is enabled
    pub fn is_enabled(&self, id: &str) -> bool {
        !self.exclude.is_match(id) || self.include.is_match(id)
    }
}

impl Default for ExecutionFilter {
    fn default() -> Self {
        Self::allow_all()
    }
}

/// Translate a glob-like pattern into a start-anchored regular expression
pub fn pattern_to_regex(pattern: &str) -> String {
    let body: Vec<String> = pattern.split('*').map(regex::escape).collect();
    format!("^{}", body.join(".*"))
}

fn compile_set<S: AsRef<str>>(patterns: &[S]) -> Result<RegexSet> {
    let mut expressions = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let expression = pattern_to_regex(pattern);
        // Compile individually so the error names the offending pattern
        Regex::new(&expression).map_err(|source| DiscoveryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        expressions.push(expression);
    }

    RegexSet::new(&expressions).map_err(|source| DiscoveryError::InvalidPattern {
        pattern: patterns
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(", "),
        source,
    })
}
