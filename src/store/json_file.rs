//! JSON-file backed implementation of [`JobStore`].

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;

use crate::cron::CronJob;
use crate::error::{AppError, AppResult};
use crate::store::JobStore;

/// Stores the job list as a pretty-printed JSON array at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl JobStore for JsonFileStore {
    async fn load(&self) -> AppResult<Vec<CronJob>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No job file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Failed to read job file, starting empty");
                return Ok(Vec::new());
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(jobs) => Ok(jobs),
            Err(e) => {
                // Corrupt state is recoverable: the next save overwrites it.
                tracing::error!(path = %self.path.display(), error = %e, "Failed to parse job file, starting empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, jobs: &[CronJob]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("creating {}", parent.display()))
                    .map_err(|source| AppError::Storage {
                        operation: "create data directory".to_string(),
                        source,
                    })?;
            }
        }

        let body = serde_json::to_vec_pretty(jobs)
            .context("serializing job list")
            .map_err(|source| AppError::Storage {
                operation: "serialize jobs".to_string(),
                source,
            })?;

        tokio::fs::write(&self.path, body)
            .await
            .with_context(|| format!("writing {}", self.path.display()))
            .map_err(|source| AppError::Storage {
                operation: "write job file".to_string(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), count = jobs.len(), "Job file saved");
        Ok(())
    }
}
