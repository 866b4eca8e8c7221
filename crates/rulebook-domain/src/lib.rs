//! # Rulebook Domain
//!
//! Core types shared by every layer of Rulebook:
//!
//! - [`Rule`] - immutable descriptor of one discovered rule function
//! - [`RuleCatalog`] - keyed view over a discovery run
//! - [`RulesSettings`] / [`ProjectContext`] - configuration inputs for discovery and execution
//! - [`RuleInvocation`] - serialized call record handed to a runtime
//! - [`ports::RuleRuntime`] - boundary contract for the isolated execution environment
//!
//! The domain crate carries no I/O. Discovery lives in `rulebook-discovery`,
//! execution orchestration in `rulebook-application` and the concrete runtime in
//! `rulebook-infrastructure`.

/// Domain constants (directive markers, reserved parameter names)
pub mod constants;
/// Domain entities
pub mod entities;
/// Error types
pub mod error;
/// Port traits implemented by outer layers
pub mod ports;
/// Value objects
pub mod value_objects;

pub use entities::{Rule, RuleCatalog};
pub use error::{Error, Result};
pub use value_objects::{ProjectContext, RuleInvocation, RulesSettings};
