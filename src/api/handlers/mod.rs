//! HTTP request handlers for API endpoints.

pub mod cron;
pub mod health;
