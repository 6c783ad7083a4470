//! Repository trait for persisted WAF settings.

use crate::domain::entities::PreventionSetting;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for the settings shared between the dashboard and the WAF engine.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSettingsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Reads the prevention mode flag.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(setting))` if the flag was ever stored
    /// - `Ok(None)` otherwise
    async fn get_prevention_mode(&self) -> Result<Option<PreventionSetting>, AppError>;

    /// Stores the prevention mode flag, creating the row if needed.
    async fn set_prevention_mode(&self, enabled: bool) -> Result<PreventionSetting, AppError>;
}
