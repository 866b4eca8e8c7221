//! # Rulebook Infrastructure
//!
//! Cross-cutting technical concerns:
//!
//! - [`config`] - layered configuration (defaults, TOML files, environment)
//! - [`logging`] - tracing subscriber setup
//! - [`paths`] - config root, rule cache and environment directories
//! - [`sync`] - copying local rule sources into the cache
//! - [`runtime`] - virtualenv-backed [`RuleRuntime`](rulebook_domain::ports::RuleRuntime)

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod paths;
pub mod runtime;
pub mod sync;

pub use config::{AppConfig, ConfigLoader, LoadedConfig};
pub use logging::init_logging;
pub use paths::RulebookPaths;
pub use runtime::VirtualEnvRuntime;
pub use sync::LocalSourceSync;
