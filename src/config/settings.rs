//! Application settings structures

use crate::config::error::ConfigError;
use crate::logger::LoggerConfig;
use serde::{Deserialize, Serialize};

/// Top-level application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Application metadata
    pub application: ApplicationConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Job persistence configuration
    pub storage: StorageConfig,
    /// Crontab scheduler configuration
    pub scheduler: SchedulerConfig,
    /// Logger configuration
    pub logger: LoggerConfig,
}

impl Settings {
    /// Validate settings after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.storage.data_file.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.data_file must not be empty".to_string(),
            ));
        }
        if self.scheduler.log_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "scheduler.log_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Application metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Application name
    pub name: String,
    /// Application version
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Full socket address string for binding
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Job persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON file holding the job list
    pub data_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: "data/cron_jobs.json".to_string(),
        }
    }
}

/// Crontab scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Directory where per-job execution logs are written
    pub log_dir: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            log_dir: "/var/log/cron_jobs".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_server_address() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        assert_eq!(server.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_data_file() {
        let mut settings = Settings::default();
        settings.storage.data_file = "  ".to_string();
        assert!(settings.validate().is_err());
    }
}
