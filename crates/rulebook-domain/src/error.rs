//! Error handling types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Rulebook
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Rule discovery failed (malformed rule file, bad pattern)
    #[error("Discovery error: {message}")]
    Discovery {
        /// Description of the discovery failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A `settings:` default referenced a path absent from project settings
    #[error("Setting not found: {path} (required by rule {rule_id})")]
    SettingNotFound {
        /// Dotted settings path
        path: String,
        /// Rule that declared the default
        rule_id: String,
    },

    /// Creating the isolated environment or installing its dependencies failed
    #[error("Environment provisioning failed: {message}")]
    Provisioning {
        /// Description of the provisioning failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A rule process exited unsuccessfully
    #[error("Rule {rule_id} failed: {message}")]
    Execution {
        /// Identifier of the failing rule
        rule_id: String,
        /// Description of the failure
        message: String,
    },

    /// A rule process exceeded its time budget
    #[error("Rule {rule_id} timed out after {seconds}s")]
    Timeout {
        /// Identifier of the hung rule
        rule_id: String,
        /// Configured budget in seconds
        seconds: u64,
    },

    /// The source location cannot be synchronized by this build
    #[error("Unsupported rule source: {source_location}")]
    UnsupportedSource {
        /// The configured location string
        source_location: String,
    },

    /// Resource not found error
    #[error("Not found: {}", path.display())]
    NotFound {
        /// The missing path
        path: PathBuf,
    },
}

// I/O error creation methods
impl Error {
    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Runtime error creation methods
impl Error {
    /// Create a provisioning error
    pub fn provisioning<S: Into<String>>(message: S) -> Self {
        Self::Provisioning {
            message: message.into(),
            source: None,
        }
    }

    /// Create a provisioning error with source
    pub fn provisioning_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Provisioning {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a rule execution error
    pub fn execution<R: Into<String>, S: Into<String>>(rule_id: R, message: S) -> Self {
        Self::Execution {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }
}
