//! Domain Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`RulesSettings`] | Source locations and exclude/include patterns |
//! | [`ProjectContext`] | Working directory, metadata and settings tree for a run |
//! | [`RuleInvocation`] | Serialized call of one rule function |

/// Serialized rule call
pub mod invocation;
/// Rules configuration and project context
pub mod settings;

pub use invocation::RuleInvocation;
pub use settings::{ProjectContext, RulesSettings};
