//! Static Rule Discovery for Rulebook
//!
//! Finds rule functions in ruleset directories without importing or running
//! them:
//! - [`filter`] - exclude/include execution filter
//! - [`parser`] - tree-sitter based rule file parser
//! - [`discoverer`] - ruleset walking and aggregation across source locations
//!
//! ```ignore
//! use rulebook_discovery::list_rules;
//! use rulebook_domain::RulesSettings;
//!
//! let settings = RulesSettings::new(vec!["./rules".into()], vec!["legacy*".into()], vec![]);
//! let rules = list_rules(&settings, rules_root)?;
//! for rule in rules.iter().filter(|r| r.is_enabled()) {
//!     println!("{} ({})", rule.id, rule.ruleset);
//! }
//! ```

pub mod discoverer;
pub mod docstring;
pub mod filter;
pub mod literal;
pub mod parser;

use std::path::PathBuf;
use thiserror::Error;

pub use discoverer::{RulesetDiscoverer, discover_rules, list_rules, ruleset_name, source_hash, source_storage};
pub use filter::ExecutionFilter;
pub use parser::RuleFileParser;

/// Result type for discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Discovery error types
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Syntax error in {} at line {line}, column {column}", file.display())]
    Syntax {
        file: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("Rule function `{function}` in {} has no `:key` directive in its docstring", file.display())]
    MissingKey { file: PathBuf, function: String },

    #[error(
        "Parameter `{parameter}` of rule function `{function}` in {} has a non-literal default: {expression}",
        file.display()
    )]
    UnsupportedDefault {
        file: PathBuf,
        function: String,
        parameter: String,
        expression: String,
    },

    #[error("Invalid rule pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to load Python grammar: {0}")]
    Grammar(String),
}

impl From<DiscoveryError> for rulebook_domain::Error {
    fn from(err: DiscoveryError) -> Self {
        rulebook_domain::Error::Discovery {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
