//! No-op WAF client for deployments without a control API.

use super::service::{WafControl, WafResult};
use async_trait::async_trait;
use tracing::debug;

/// A WAF client that drops every change.
///
/// The database remains the source of truth; the WAF picks the flag up from there.
pub struct NullWafClient;

impl NullWafClient {
    pub fn new() -> Self {
        debug!("Using NullWafClient (WAF_API_URL not set)");
        Self
    }
}

impl Default for NullWafClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WafControl for NullWafClient {
    async fn set_prevention_mode(&self, _enabled: bool) -> WafResult<()> {
        Ok(())
    }

    fn is_configured(&self) -> bool {
        false
    }
}
