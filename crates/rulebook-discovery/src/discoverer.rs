//! Ruleset discovery
//!
//! Cache layout, one subtree per configured source location:
//!
//! ```text
//! <rules_root>/<sha256-hex(location)>/<name>-ruleset/<file>.py
//! ```
//!
//! Each immediate subdirectory of a location's storage is a ruleset, and every
//! `.py` file directly inside it is a rule file.

use std::path::{Path, PathBuf};

use rulebook_domain::constants::{RULE_FILE_EXTENSION, RULESET_SUFFIX};
use rulebook_domain::{Rule, RulesSettings};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::Result;
use crate::filter::ExecutionFilter;
use crate::parser::RuleFileParser;

/// Stable cache identifier of a source location: hex SHA-256 of the exact string
pub fn source_hash(location: &str) -> String {
    hex::encode(Sha256::digest(location.as_bytes()))
}

/// Cache directory holding the synced copy of `location`
pub fn source_storage(rules_root: &Path, location: &str) -> PathBuf {
    rules_root.join(source_hash(location))
}

/// Ruleset name for a directory name: the `-ruleset` suffix is dropped
pub fn ruleset_name(dir_name: &str) -> &str {
    dir_name.strip_suffix(RULESET_SUFFIX).unwrap_or(dir_name)
}

/// Walks ruleset directories and parses their rule files
pub struct RulesetDiscoverer {
    parser: RuleFileParser,
    filter: ExecutionFilter,
}

impl RulesetDiscoverer {
    /// Create a discoverer applying `filter` to every discovered rule
    pub fn new(filter: ExecutionFilter) -> Result<Self> {
        Ok(Self {
            parser: RuleFileParser::new()?,
            filter,
        })
    }

    /// Discover all rules below one storage directory
    ///
    /// Rulesets and files are visited in file-name order.
    pub fn discover(&mut self, storage: &Path) -> Result<Vec<Rule>> {
        debug!("Looking for rulesets in {}", storage.display());
        let mut rules = Vec::new();

        for ruleset_dir in immediate_entries(storage)? {
            if !ruleset_dir.is_dir() {
                continue;
            }
            let dir_name = ruleset_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let ruleset = ruleset_name(&dir_name);
            debug!("Discovered new ruleset in {}@{}", dir_name, storage.display());

            rules.extend(self.discover_ruleset(&ruleset_dir, ruleset)?);
        }

        Ok(rules)
    }

    /// Parse every rule file directly inside one ruleset directory
    pub fn discover_ruleset(&mut self, location: &Path, ruleset: &str) -> Result<Vec<Rule>> {
        debug!("Searching for rule files in: {}", location.display());
        let mut rules = Vec::new();

        for file in immediate_entries(location)? {
            if !is_rule_file(&file) {
                continue;
            }
            debug!(
                "Discovered new rule file {} for ruleset {}",
                file.display(),
                ruleset
            );
            let filter = &self.filter;
            rules.extend(
                self.parser
                    .parse_file(&file, ruleset, |id| filter.is_enabled(id))?,
            );
        }

        Ok(rules)
    }
}

/// Discover rules below `storage` with the given exclude/include patterns
pub fn discover_rules<S: AsRef<str>>(storage: &Path, exclude: &[S], include: &[S]) -> Result<Vec<Rule>> {
    let filter = ExecutionFilter::new(exclude, include)?;
    RulesetDiscoverer::new(filter)?.discover(storage)
}

/// Discover rules across every configured source location
///
/// Locations are visited in configured order, so each location's rules are
/// contiguous in the result. A location that has not been synced yet
/// contributes nothing.
pub fn list_rules(settings: &RulesSettings, rules_root: &Path) -> Result<Vec<Rule>> {
    let mut discoverer = RulesetDiscoverer::new(ExecutionFilter::from_settings(settings)?)?;
    let mut available = Vec::new();

    for location in &settings.source {
        let storage = source_storage(rules_root, location);
        if !storage.is_dir() {
            warn!(
                source = %location,
                storage = %storage.display(),
                "Rule source has not been synced yet, skipping"
            );
            continue;
        }
        available.extend(discoverer.discover(&storage)?);
    }

    Ok(available)
}

fn immediate_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        entries.push(entry?.into_path());
    }
    Ok(entries)
}

fn is_rule_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext == RULE_FILE_EXTENSION)
}
