//! Webcron Library
//!
//! Core library modules for the webcron scheduling service.

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cli;
pub mod config;
pub mod cron;
pub mod error;
pub mod logger;
pub mod scheduler;
pub mod server;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;

pub use state::AppState;
