//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`LogRepository`] - WAF request log queries and aggregations
//! - [`SettingsRepository`] - Prevention mode storage

pub mod log_repository;
pub mod settings_repository;

pub use log_repository::LogRepository;
pub use settings_repository::SettingsRepository;

#[cfg(test)]
pub use log_repository::MockLogRepository;
#[cfg(test)]
pub use settings_repository::MockSettingsRepository;
