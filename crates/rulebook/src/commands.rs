//! Command wiring
//!
//! [`Rulebook`] ties the loaded configuration to discovery, sync and the
//! orchestrator. Each public method backs one CLI subcommand.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rulebook_application::{ApplyReport, RuleOrchestrator};
use rulebook_discovery::list_rules;
use rulebook_domain::{Result, Rule, RuleCatalog};
use rulebook_infrastructure::{
    ConfigLoader, LoadedConfig, LocalSourceSync, RulebookPaths, VirtualEnvRuntime,
};
use tracing::info;

/// Shown when `[rules] source` is empty
pub const NO_SOURCES_HINT: &str =
    "No rule sources configured. Add `source = [...]` under [rules] in rulebook.toml.";

/// Shown when sources are configured but nothing was discovered
pub const NO_RULES_HINT: &str =
    "No rules found. Run `rulebook update` to sync the configured rule sources.";

/// A project with its merged configuration
pub struct Rulebook {
    loaded: LoadedConfig,
    paths: RulebookPaths,
    project_dir: PathBuf,
}

impl Rulebook {
    /// Load configuration for the project in `project_dir`
    pub fn load(config_path: Option<&Path>, project_dir: &Path) -> Result<Self> {
        let mut loader = ConfigLoader::new().with_project_dir(project_dir);
        if let Some(path) = config_path {
            loader = loader.with_config_path(path);
        }
        Self::from_loaded(loader.load()?, project_dir)
    }

    /// Build from an already loaded configuration
    pub fn from_loaded(loaded: LoadedConfig, project_dir: &Path) -> Result<Self> {
        let paths = RulebookPaths::from_config(&loaded.config.paths)?;
        Ok(Self {
            loaded,
            paths,
            project_dir: project_dir.to_path_buf(),
        })
    }

    /// Merged configuration
    pub fn config(&self) -> &LoadedConfig {
        &self.loaded
    }

    /// Directory layout in use
    pub fn paths(&self) -> &RulebookPaths {
        &self.paths
    }

    /// Configured source locations
    pub fn sources(&self) -> &[String] {
        &self.loaded.config.rules.source
    }

    /// Discover every rule of every synced source location
    pub fn list(&self) -> Result<Vec<Rule>> {
        Ok(list_rules(&self.loaded.config.rules, &self.paths.rules_dir())?)
    }

    /// Run every enabled rule; `None` when there was nothing to run
    pub async fn apply(&self) -> Result<Option<ApplyReport>> {
        let catalog = RuleCatalog::new(self.list()?);
        if catalog.is_empty() {
            return Ok(None);
        }

        let runtime = Arc::new(VirtualEnvRuntime::new(
            self.paths.clone(),
            &self.loaded.config.execution,
        ));
        let context = self.loaded.project_context(&self.project_dir);
        let report = RuleOrchestrator::new(runtime)
            .apply(catalog.rules(), &context, self.sources())
            .await?;
        Ok(Some(report))
    }

    /// Sync local sources into the cache and install their dependencies
    pub async fn update(&self) -> Result<()> {
        let synced = LocalSourceSync::new(self.paths.clone(), &self.project_dir)
            .sync_all(self.sources())?;
        info!(sources = synced.len(), "Rule sources synced");

        let runtime = Arc::new(VirtualEnvRuntime::new(
            self.paths.clone(),
            &self.loaded.config.execution,
        ));
        RuleOrchestrator::new(runtime).update(self.sources()).await
    }
}
