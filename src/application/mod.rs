//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls and integrations and provide a clean
//! API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::log_service::LogService`] - Live log view and dashboard status
//! - [`services::analytics_service::AnalyticsService`] - Timeline, anomalous IPs, attack origins
//! - [`services::prevention_service::PreventionService`] - Prevention mode switch

pub mod services;
