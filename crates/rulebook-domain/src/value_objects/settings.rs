//! Rules configuration and project context

use crate::constants::SETTINGS_PATH_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The `[rules]` configuration section
///
/// Every list is multi-valued and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesSettings {
    /// Ordered rule source locations (local paths or remote specifiers)
    pub source: Vec<String>,
    /// Rule id patterns to exclude from execution
    pub exclude: Vec<String>,
    /// Rule id patterns that override exclusion
    pub include: Vec<String>,
}

impl RulesSettings {
    /// Create settings from the three pattern lists
    pub fn new(source: Vec<String>, exclude: Vec<String>, include: Vec<String>) -> Self {
        Self {
            source,
            exclude,
            include,
        }
    }

    /// True when no source location is configured
    pub fn has_sources(&self) -> bool {
        !self.source.is_empty()
    }
}

/// Everything a rule execution may draw arguments from
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectContext {
    /// Project working directory, passed as `project_dir`
    pub working_dir: PathBuf,
    /// Project metadata, passed as `meta`
    pub meta: serde_json::Map<String, serde_json::Value>,
    /// Full settings tree, target of `settings:` lookups
    pub settings: serde_json::Value,
}

impl ProjectContext {
    /// Create a context with empty metadata and settings
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            meta: serde_json::Map::new(),
            settings: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    /// Replace the project metadata
    pub fn with_meta(mut self, meta: serde_json::Map<String, serde_json::Value>) -> Self {
        self.meta = meta;
        self
    }

    /// Replace the settings tree
    pub fn with_settings(mut self, settings: serde_json::Value) -> Self {
        self.settings = settings;
        self
    }

    /// Look up a dotted path (`a.b.c`) in the settings tree
    ///
    /// Object keys are matched exactly; a numeric segment also indexes arrays.
    /// An empty path returns the whole tree.
    pub fn setting(&self, path: &str) -> Option<&serde_json::Value> {
        if path.is_empty() {
            return Some(&self.settings);
        }
        path.split(SETTINGS_PATH_SEPARATOR)
            .try_fold(&self.settings, |node, segment| match node {
                serde_json::Value::Object(map) => map.get(segment),
                serde_json::Value::Array(items) => {
                    segment.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                _ => None,
            })
    }
}
