//! WAF control trait and error types.

use async_trait::async_trait;

/// Errors that can occur while talking to the WAF control API.
#[derive(Debug, thiserror::Error)]
pub enum WafError {
    #[error("WAF client configuration error: {0}")]
    Config(String),
    #[error("WAF request failed: {0}")]
    Request(String),
    #[error("WAF rejected the request with status {0}")]
    Status(u16),
}

/// Result type for WAF control operations.
pub type WafResult<T> = Result<T, WafError>;

/// Pushes configuration changes to the running WAF engine.
///
/// # Implementations
///
/// - [`crate::infrastructure::waf::HttpWafClient`] - HTTP client for the WAF control API
/// - [`crate::infrastructure::waf::NullWafClient`] - No-op when no WAF URL is configured
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WafControl: Send + Sync {
    /// Switches prevention mode on the WAF engine.
    ///
    /// # Errors
    ///
    /// Returns [`WafError`] if the engine is unreachable or answers with a
    /// non-success status.
    async fn set_prevention_mode(&self, enabled: bool) -> WafResult<()>;

    /// Returns whether changes are actually delivered somewhere.
    fn is_configured(&self) -> bool;
}
