//! Application configuration
//!
//! Layered configuration loading: `default.toml`, an environment-specific
//! file, `local.toml`, then `WEBCRON_*` environment variables.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, SchedulerConfig, ServerConfig, Settings, StorageConfig,
};
