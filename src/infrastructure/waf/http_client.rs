//! HTTP client for the WAF control API.

use super::service::{WafControl, WafError, WafResult};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Serialize)]
struct PreventionModeRequest {
    enabled: bool,
}

/// Client posting configuration changes to the WAF engine.
pub struct HttpWafClient {
    client: reqwest::Client,
    prevention_url: Url,
}

impl HttpWafClient {
    /// Creates a client for the WAF listening at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`WafError::Config`] if `base_url` is not a valid http(s) URL
    /// or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> WafResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| WafError::Config(format!("invalid WAF URL '{}': {}", base_url, e)))?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(WafError::Config(format!(
                "WAF URL must use http or https, got '{}'",
                base.scheme()
            )));
        }

        let prevention_url = base
            .join("/api/waf/prevention")
            .map_err(|e| WafError::Config(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WafError::Config(e.to_string()))?;

        Ok(Self {
            client,
            prevention_url,
        })
    }

    /// Full URL used for prevention mode updates.
    pub fn prevention_url(&self) -> &Url {
        &self.prevention_url
    }
}

#[async_trait]
impl WafControl for HttpWafClient {
    async fn set_prevention_mode(&self, enabled: bool) -> WafResult<()> {
        let response = self
            .client
            .post(self.prevention_url.clone())
            .json(&PreventionModeRequest { enabled })
            .send()
            .await
            .map_err(|e| WafError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WafError::Status(status.as_u16()));
        }

        debug!(enabled, "Prevention mode forwarded to WAF");
        Ok(())
    }

    fn is_configured(&self) -> bool {
        true
    }
}
