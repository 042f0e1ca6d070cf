//! Application state for the Axum web framework.

use std::sync::Arc;

use crate::scheduler::SchedulerGateway;
use crate::services::Services;

/// Application state shared across all request handlers.
///
/// Cloning is cheap since services and the scheduler handle use `Arc`
/// internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Scheduler gateway, exposed for the health endpoint's daemon probe
    pub scheduler: Arc<dyn SchedulerGateway>,
}

impl AppState {
    pub fn new(services: Services, scheduler: Arc<dyn SchedulerGateway>) -> Self {
        Self {
            services,
            scheduler,
        }
    }
}
