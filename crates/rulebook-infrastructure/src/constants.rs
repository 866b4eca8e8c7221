//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `rulebook_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "rulebook.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "rulebook";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "RULEBOOK";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a tracing filter directive
pub const LOG_ENV_VAR: &str = "RULEBOOK_LOG";

/// Fallback file stem for the rolling log file
pub const DEFAULT_LOG_FILE_STEM: &str = "rulebook";

// ============================================================================
// LAYOUT CONSTANTS
// ============================================================================

/// Rule cache directory below the config root
pub const RULES_DIR_NAME: &str = "rules";

/// Isolated environment directory below the config root
pub const VENV_DIR_NAME: &str = "rules-venv";

/// Dependency manifest at the root of a rule source
pub const REQUIREMENTS_FILENAME: &str = "requirements.txt";

/// Directories never copied into the rule cache
pub const SYNC_SKIP_DIRS: &[&str] = &[".git", "__pycache__", ".venv"];

// ============================================================================
// EXECUTION CONSTANTS
// ============================================================================

/// Interpreter used to create the environment
pub const DEFAULT_PYTHON: &str = "python3";

/// Per-rule time budget in seconds (0 disables the limit)
pub const DEFAULT_RULE_TIMEOUT_SECS: u64 = 600;

/// Markers that identify a remote source specifier
pub const REMOTE_SOURCE_MARKERS: &[&str] = &["://", "git@"];
