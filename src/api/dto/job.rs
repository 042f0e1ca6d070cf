//! Cron-job DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::cron::{CronJob, NewCronJob, Recurrence, UpdateCronJob};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new cron job.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "name": "Daily backup",
    "targetUrl": "https://api.example.com/backup",
    "payload": "{\"kind\": \"backup\"}",
    "recurrence": {
        "periodicity": 1,
        "startTime": "09:00",
        "interval": "1h"
    }
}))]
pub struct CreateCronJobRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Daily backup")]
    pub name: String,

    #[validate(length(min = 1, message = "Target URL is required"))]
    #[schema(example = "https://api.example.com/backup")]
    pub target_url: String,

    /// Raw JSON text sent verbatim as the POST body; a GET is issued
    /// when absent.
    #[schema(example = "{\"kind\": \"backup\"}")]
    pub payload: Option<String>,

    pub recurrence: Recurrence,
}

impl CreateCronJobRequest {
    pub fn into_new_job(self) -> NewCronJob {
        NewCronJob {
            name: self.name,
            target_url: self.target_url,
            payload: self.payload,
            recurrence: self.recurrence,
        }
    }
}

/// Request body for updating a cron job; absent fields keep their
/// current value.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCronJobRequest {
    pub name: Option<String>,
    pub target_url: Option<String>,
    pub payload: Option<String>,
    pub recurrence: Option<Recurrence>,
}

impl UpdateCronJobRequest {
    pub fn into_update_job(self) -> UpdateCronJob {
        UpdateCronJob {
            name: self.name,
            target_url: self.target_url,
            payload: self.payload,
            recurrence: self.recurrence,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for cron job data.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CronJobResponse {
    #[schema(example = 1)]
    pub id: u64,
    pub name: String,
    pub target_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    pub recurrence: Recurrence,
    #[schema(example = "0 9-23 * * *")]
    pub schedule_expression: String,
    pub command: String,
    pub slug: String,
    #[schema(example = "2026-01-01T09:00:00Z")]
    pub created_at: String,
    #[schema(example = "2026-01-01T09:00:00Z")]
    pub updated_at: String,
}

impl From<CronJob> for CronJobResponse {
    fn from(job: CronJob) -> Self {
        Self {
            id: job.id,
            name: job.name,
            target_url: job.target_url,
            payload: job.payload,
            recurrence: job.recurrence,
            schedule_expression: job.schedule_expression,
            command: job.command,
            slug: job.slug,
            created_at: job.created_at.to_string(),
            updated_at: job.updated_at.to_string(),
        }
    }
}

/// Confirmation body for a successful delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteCronJobResponse {
    pub success: bool,
    pub message: String,
}
