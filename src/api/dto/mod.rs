//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `job` - Cron job request/response DTOs
//! - `health` - Health check response DTO
//! - `error` - Common error response DTOs

mod error;
mod health;
mod job;

pub use error::ErrorResponse;
pub use health::HealthResponse;
pub use job::{CreateCronJobRequest, CronJobResponse, DeleteCronJobResponse, UpdateCronJobRequest};
