//! Outbound control channel to the WAF engine.
//!
//! Provides a [`WafControl`] trait with two implementations:
//! - [`HttpWafClient`] - Posts changes to the WAF control API
//! - [`NullWafClient`] - No-op when `WAF_API_URL` is not configured

mod http_client;
mod null_client;
mod service;

pub use http_client::HttpWafClient;
pub use null_client::NullWafClient;
pub use service::{WafControl, WafError, WafResult};

#[cfg(test)]
pub use service::MockWafControl;
