//! # Rulebook
//!
//! Discovers project convention rules written as Python functions, decides
//! which of them are enabled, and runs them in an isolated environment.
//!
//! ## Example
//!
//! ```ignore
//! use rulebook::Rulebook;
//!
//! let rulebook = Rulebook::load(None, std::path::Path::new("."))?;
//! for rule in rulebook.list()? {
//!     println!("{} {}", rule.id, rule.summary());
//! }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - rule descriptors, settings, errors and the runtime port
//! - `discovery` - static parsing of rule files and the execution filter
//! - `application` - argument resolution and sequential orchestration
//! - `infrastructure` - configuration, logging, source sync and the virtualenv runtime

pub mod commands;
pub mod listing;

/// Domain layer - core types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use rulebook_domain::*;
}

/// Discovery layer - rule file parsing and filtering
pub mod discovery {
    pub use rulebook_discovery::*;
}

/// Application layer - orchestration
pub mod application {
    pub use rulebook_application::*;
}

/// Infrastructure layer - config, logging and runtime
pub mod infrastructure {
    pub use rulebook_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use commands::Rulebook;
