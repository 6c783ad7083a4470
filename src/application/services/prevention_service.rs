//! Prevention mode management.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::PreventionSetting;
use crate::domain::repositories::SettingsRepository;
use crate::error::AppError;
use crate::infrastructure::waf::WafControl;

/// Outcome of a prevention mode change.
#[derive(Debug, Clone, PartialEq)]
pub struct PreventionUpdate {
    pub setting: PreventionSetting,
    /// Whether the WAF engine acknowledged the change.
    pub forwarded: bool,
}

/// Service switching the WAF between monitoring and blocking.
///
/// The database is the source of truth. The WAF engine is notified on a
/// best-effort basis; an unreachable engine never rolls the change back.
pub struct PreventionService<S: SettingsRepository + ?Sized, W: WafControl + ?Sized> {
    settings: Arc<S>,
    waf: Arc<W>,
}

impl<S: SettingsRepository + ?Sized, W: WafControl + ?Sized> PreventionService<S, W> {
    /// Creates a new prevention service.
    pub fn new(settings: Arc<S>, waf: Arc<W>) -> Self {
        Self { settings, waf }
    }

    /// Returns whether prevention mode is on. Defaults to `false`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn is_enabled(&self) -> Result<bool, AppError> {
        Ok(self
            .settings
            .get_prevention_mode()
            .await?
            .is_some_and(|s| s.enabled))
    }

    /// Stores the new flag, then forwards it to the WAF engine.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the flag cannot be stored. Forwarding
    /// failures are logged and reported through [`PreventionUpdate::forwarded`].
    pub async fn set_enabled(&self, enabled: bool) -> Result<PreventionUpdate, AppError> {
        let setting = self.settings.set_prevention_mode(enabled).await?;
        info!(enabled, "Prevention mode updated");

        let forwarded = if self.waf.is_configured() {
            match self.waf.set_prevention_mode(enabled).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Error forwarding prevention mode to WAF");
                    false
                }
            }
        } else {
            false
        };

        Ok(PreventionUpdate { setting, forwarded })
    }
}
