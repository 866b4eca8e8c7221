//! Application Layer - Rulebook
//!
//! Turns discovered rule descriptors into rule runs:
//!
//! - [`resolution`] - final keyword arguments for one rule from its declared
//!   defaults, the project settings tree and the implicit values
//! - [`orchestrator`] - provisions the runtime and runs enabled rules one at a
//!   time through the [`RuleRuntime`](rulebook_domain::ports::RuleRuntime) port
//!
//! This crate depends only on `rulebook-domain`; the concrete runtime is
//! injected by the caller.

pub mod orchestrator;
pub mod resolution;

pub use orchestrator::{ApplyReport, RuleOrchestrator, RuleOutcome};
pub use resolution::resolve_arguments;
