//! Configuration management
//!
//! `rulebook.toml` layout:
//!
//! ```toml
//! [rules]
//! source = ["./rules", "../shared-rules"]
//! exclude = ["legacy*"]
//! include = ["legacy.keep"]
//!
//! [paths]
//! config_root = "/var/lib/rulebook"
//!
//! [execution]
//! python = "python3"
//! timeout_secs = 600
//!
//! [logging]
//! level = "info"
//!
//! [meta]
//! name = "my-project"
//! ```
//!
//! Any other table is kept in the settings tree and can be referenced from a
//! rule default as `settings:<table>.<key>`.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, LoadedConfig};
pub use types::{AppConfig, ExecutionConfig, LoggingConfig, PathsConfig};
