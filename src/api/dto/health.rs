//! Health check response DTO.

use serde::Serialize;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall service status
    #[schema(example = "healthy")]
    pub status: String,
    /// Service name
    #[schema(example = "webcron")]
    pub service: String,
    /// Whether the cron daemon process is present
    #[schema(example = true)]
    pub cron_running: bool,
}
