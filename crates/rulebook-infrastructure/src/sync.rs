//! Rule source synchronization
//!
//! Local source locations are copied into the cache under the hash of the
//! location string exactly as configured. A relative location is read
//! relative to the project directory. Remote specifiers are rejected.

use crate::constants::{REMOTE_SOURCE_MARKERS, SYNC_SKIP_DIRS};
use crate::error_ext::ErrorContext;
use crate::paths::RulebookPaths;
use rulebook_domain::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Copies local rule sources into the rule cache
#[derive(Debug, Clone)]
pub struct LocalSourceSync {
    paths: RulebookPaths,
    base_dir: PathBuf,
}

impl LocalSourceSync {
    /// Sync into `paths`, resolving relative locations against `base_dir`
    pub fn new(paths: RulebookPaths, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            paths,
            base_dir: base_dir.into(),
        }
    }

    /// Whether `location` names a remote source
    pub fn is_remote(location: &str) -> bool {
        REMOTE_SOURCE_MARKERS
            .iter()
            .any(|marker| location.contains(marker))
    }

    /// Directory a local location points at
    pub fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Replace the cached copy of `location` with its current content
    ///
    /// Returns the storage directory.
    pub fn sync(&self, location: &str) -> Result<PathBuf> {
        if Self::is_remote(location) {
            return Err(Error::UnsupportedSource {
                source_location: location.to_string(),
            });
        }
        let origin = self.resolve(location);
        if !origin.is_dir() {
            return Err(Error::NotFound { path: origin });
        }

        let storage = self.paths.source_storage(location);
        if storage.exists() {
            fs::remove_dir_all(&storage)
                .io_context(format!("Failed to clear {}", storage.display()))?;
        }
        let copied = copy_tree(&origin, &storage)?;

        info!(
            source = %location,
            storage = %storage.display(),
            files = copied,
            "Rule source synced"
        );
        Ok(storage)
    }

    /// Sync every location in order, stopping at the first failure
    pub fn sync_all(&self, locations: &[String]) -> Result<Vec<PathBuf>> {
        locations.iter().map(|location| self.sync(location)).collect()
    }
}

fn copy_tree(origin: &Path, target: &Path) -> Result<usize> {
    fs::create_dir_all(target).io_context(format!("Failed to create {}", target.display()))?;

    let mut copied = 0;
    let walker = WalkDir::new(origin)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry));
    for entry in walker {
        let entry = entry.io_context(format!("Failed to walk {}", origin.display()))?;
        let relative = entry
            .path()
            .strip_prefix(origin)
            .map_err(|e| Error::io_with_source("Entry outside source tree", e))?;
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)
                .io_context(format!("Failed to create {}", destination.display()))?;
        } else if entry.path().is_file() {
            debug!("Copying {}", relative.display());
            fs::copy(entry.path(), &destination)
                .io_context(format!("Failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SYNC_SKIP_DIRS.contains(&name))
}
