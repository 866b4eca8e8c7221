//! Domain Port Interfaces
//!
//! Ports define the contracts that outer layers implement. The application
//! layer depends on these traits only; `rulebook-infrastructure` supplies the
//! concrete implementations.

/// Isolated rule execution environment
pub mod runtime;

pub use runtime::{RuleRuntime, SharedRuleRuntime};
