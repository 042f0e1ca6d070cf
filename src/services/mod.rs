//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between the
//! store, the scheduler gateway, and the HTTP handlers.

mod job_service;

pub use job_service::JobService;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since the services use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub jobs: JobService,
}

impl Services {
    /// Creates a new Services instance.
    pub fn new(jobs: JobService) -> Self {
        Self { jobs }
    }
}
