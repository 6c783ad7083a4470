//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgLogRepository`] - WAF request log queries and aggregations
//! - [`PgSettingsRepository`] - Prevention mode storage

pub mod pg_log_repository;
pub mod pg_settings_repository;

pub use pg_log_repository::PgLogRepository;
pub use pg_settings_repository::PgSettingsRepository;
