//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AnalyticsService, LogService, PreventionService};
use crate::domain::repositories::{LogRepository, SettingsRepository};
use crate::infrastructure::geoip::GeoLocator;
use crate::infrastructure::waf::WafControl;

pub type DynLogService = LogService<dyn LogRepository, dyn SettingsRepository>;
pub type DynAnalyticsService = AnalyticsService<dyn LogRepository, dyn GeoLocator>;
pub type DynPreventionService = PreventionService<dyn SettingsRepository, dyn WafControl>;

/// Services shared by all requests.
///
/// Cloning is cheap: every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub log_service: Arc<DynLogService>,
    pub analytics_service: Arc<DynAnalyticsService>,
    pub prevention_service: Arc<DynPreventionService>,
}

impl AppState {
    /// Wires the services on top of the given backends.
    ///
    /// `timezone` is the IANA zone used to label attack timeline hours.
    pub fn new(
        logs: Arc<dyn LogRepository>,
        settings: Arc<dyn SettingsRepository>,
        geo: Arc<dyn GeoLocator>,
        waf: Arc<dyn WafControl>,
        timezone: &str,
    ) -> Self {
        Self {
            log_service: Arc::new(LogService::new(logs.clone(), settings.clone())),
            analytics_service: Arc::new(AnalyticsService::new(logs, geo, timezone)),
            prevention_service: Arc::new(PreventionService::new(settings, waf)),
        }
    }
}
