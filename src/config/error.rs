//! Configuration error types

use thiserror::Error;

/// Errors that can occur while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load configuration from file or environment
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    /// Failed to parse or deserialize configuration
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Configuration value failed validation
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// Required configuration file was not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Mutually exclusive configuration sources were both set
    #[error("Conflicting configuration sources: {0}")]
    MutualExclusivityError(String),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVarError(String),
}

impl ConfigError {
    /// Create a file not found error
    pub fn file_not_found(msg: impl Into<String>) -> Self {
        Self::FileNotFound(msg.into())
    }

    /// Create a mutual exclusivity error
    pub fn mutual_exclusivity(msg: impl Into<String>) -> Self {
        Self::MutualExclusivityError(msg.into())
    }
}
