//! Business logic services for the application layer.

pub mod analytics_service;
pub mod log_service;
pub mod prevention_service;

pub use analytics_service::AnalyticsService;
pub use log_service::{DashboardStatus, LogService};
pub use prevention_service::{PreventionService, PreventionUpdate};
