//! Domain entities

/// Rule descriptor and catalog
pub mod rule;

pub use rule::{Rule, RuleCatalog};
