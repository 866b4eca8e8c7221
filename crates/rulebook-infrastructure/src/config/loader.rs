//! Configuration loader
//!
//! Sources are merged in this order (later sources override earlier):
//! 1. Default values from `AppConfig::default()`
//! 2. User configuration (`<platform config dir>/rulebook/rulebook.toml`)
//! 3. An explicit configuration file, or `<project dir>/rulebook.toml`
//! 4. Environment variables (e.g. `RULEBOOK_EXECUTION__TIMEOUT_SECS`)

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
    LOG_ENV_VAR,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use rulebook_domain::error::{Error, Result};
use rulebook_domain::ProjectContext;
use std::path::{Path, PathBuf};

/// Configuration after merging every source
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Typed view
    pub config: AppConfig,

    /// The whole merged tree, unknown tables included
    pub settings: serde_json::Value,

    /// Files that contributed, in merge order
    pub files: Vec<PathBuf>,
}

impl LoadedConfig {
    /// Execution context for a project rooted at `working_dir`
    pub fn project_context(&self, working_dir: impl Into<PathBuf>) -> ProjectContext {
        ProjectContext::new(working_dir)
            .with_meta(self.config.meta.clone())
            .with_settings(self.settings.clone())
    }

    /// Log every contributing file
    ///
    /// Loading normally happens before the subscriber exists, so callers
    /// report the sources once logging is initialized.
    pub fn log_sources(&self) {
        for file in &self.files {
            log_config_loaded(file, true);
        }
    }
}

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Explicit configuration file path
    config_path: Option<PathBuf>,

    /// Project directory searched for `rulebook.toml`
    project_dir: Option<PathBuf>,

    /// Whether the per-user configuration file is consulted
    user_config: bool,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            project_dir: None,
            user_config: true,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the project directory searched for the default configuration file
    pub fn with_project_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.project_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Skip the per-user configuration file
    pub fn without_user_config(mut self) -> Self {
        self.user_config = false;
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    pub fn load(&self) -> Result<LoadedConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
        let mut files = Vec::new();

        if self.user_config {
            if let Some(user_path) = Self::user_config_path().filter(|p| p.is_file()) {
                figment = figment.merge(Toml::file(&user_path));
                files.push(user_path);
            }
        }

        if let Some(config_path) = &self.config_path {
            if !config_path.is_file() {
                log_config_loaded(config_path, false);
                return Err(Error::NotFound {
                    path: config_path.clone(),
                });
            }
            figment = figment.merge(Toml::file(config_path));
            files.push(config_path.clone());
        } else if let Some(project_path) = self.project_config_path().filter(|p| p.is_file()) {
            figment = figment.merge(Toml::file(&project_path));
            files.push(project_path);
        }

        // The log filter variable shares the prefix but is not a setting
        let log_key = LOG_ENV_VAR
            .strip_prefix(&format!("{CONFIG_ENV_PREFIX}_"))
            .unwrap_or(LOG_ENV_VAR)
            .to_lowercase();
        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR)
                .ignore(&[log_key.as_str()]),
        );

        let config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;
        validate_app_config(&config)?;

        let settings: serde_json::Value = figment
            .extract()
            .config_context("Failed to extract settings tree")?;

        Ok(LoadedConfig {
            config,
            settings,
            files,
        })
    }

    /// Get the explicit configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Per-user configuration file location
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME))
    }

    fn project_config_path(&self) -> Option<PathBuf> {
        let dir = match &self.project_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().ok()?,
        };
        Some(dir.join(DEFAULT_CONFIG_FILENAME))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    if config.execution.python.trim().is_empty() {
        return Err(Error::config("Execution interpreter (execution.python) cannot be empty"));
    }
    Ok(())
}
