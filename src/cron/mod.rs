//! Cron domain: job records and the pure translation layer.
//!
//! This module turns a human-facing recurrence description into a
//! five-field crontab expression and an executable shell command. The
//! builders are pure functions; everything stateful lives in the store
//! and service layers.

pub mod command;
pub mod expression;
pub mod models;
pub mod validate;

pub use command::{build_command, slugify_url};
pub use expression::build_expression;
pub use models::{CronJob, NewCronJob, Periodicity, Recurrence, UpdateCronJob};
pub use validate::is_valid_expression;
