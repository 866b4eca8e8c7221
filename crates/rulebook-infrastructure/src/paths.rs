//! Filesystem layout
//!
//! ```text
//! <config_root>/
//!   rules/<sha256-hex(location)>/...   synced copy of each source location
//!   rules-venv/                        isolated interpreter environment
//! ```

use crate::config::PathsConfig;
use crate::constants::{DEFAULT_CONFIG_DIR, REQUIREMENTS_FILENAME, RULES_DIR_NAME, VENV_DIR_NAME};
use rulebook_domain::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Resolved Rulebook directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulebookPaths {
    root: PathBuf,
}

impl RulebookPaths {
    /// Layout rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Layout from configuration, falling back to the platform config directory
    pub fn from_config(config: &PathsConfig) -> Result<Self> {
        if let Some(root) = &config.config_root {
            return Ok(Self::new(root));
        }
        dirs::config_dir()
            .map(|dir| Self::new(dir.join(DEFAULT_CONFIG_DIR)))
            .ok_or_else(|| {
                Error::config("No platform config directory; set paths.config_root explicitly")
            })
    }

    /// Config root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rule cache directory
    pub fn rules_dir(&self) -> PathBuf {
        self.root.join(RULES_DIR_NAME)
    }

    /// Isolated environment directory
    pub fn venv_dir(&self) -> PathBuf {
        self.root.join(VENV_DIR_NAME)
    }

    /// Cache directory of one source location
    pub fn source_storage(&self, location: &str) -> PathBuf {
        rulebook_discovery::source_storage(&self.rules_dir(), location)
    }

    /// Dependency manifest of one synced source location
    pub fn requirements_file(&self, location: &str) -> PathBuf {
        self.source_storage(location).join(REQUIREMENTS_FILENAME)
    }
}
