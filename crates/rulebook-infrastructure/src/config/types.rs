//! Configuration types

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_PYTHON, DEFAULT_RULE_TIMEOUT_SECS};
use rulebook_domain::RulesSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Rule sources and execution filter patterns
    pub rules: RulesSettings,

    /// Filesystem layout overrides
    pub paths: PathsConfig,

    /// Rule process settings
    pub execution: ExecutionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Project metadata passed to rules as `meta`
    pub meta: serde_json::Map<String, serde_json::Value>,
}

/// Filesystem layout overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root holding the rule cache and the environment (platform config dir when unset)
    pub config_root: Option<PathBuf>,
}

/// Rule process settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Interpreter used to create the isolated environment
    pub python: String,

    /// Per-rule time budget in seconds; 0 disables it
    pub timeout_secs: u64,
}

impl ExecutionConfig {
    /// Time budget for one rule, `None` when unlimited
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            python: DEFAULT_PYTHON.to_string(),
            timeout_secs: DEFAULT_RULE_TIMEOUT_SECS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to file in addition to stderr
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
