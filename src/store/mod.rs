//! Persistence layer for job records.
//!
//! The [`JobStore`] trait is the seam between the service layer and the
//! storage medium, so tests can swap in an in-memory fake.

mod json_file;

pub use json_file::JsonFileStore;

use async_trait::async_trait;

use crate::cron::CronJob;
use crate::error::AppResult;

/// Persistence gateway for the full job list.
///
/// `save` always receives the complete list; the store is a mirror of
/// the in-memory state, not an incremental log.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Loads all persisted jobs. A missing or unreadable backing file is
    /// not an error; the store starts empty.
    async fn load(&self) -> AppResult<Vec<CronJob>>;

    /// Persists the full job list, replacing any previous contents.
    async fn save(&self, jobs: &[CronJob]) -> AppResult<()>;
}
