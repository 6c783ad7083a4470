//! Helper functions shared by the API layer.
//!
//! - [`timestamps`] - RFC 3339 formatting and lenient timestamp parsing
//! - [`truthy`] - Loose boolean interpretation of JSON values

pub mod timestamps;
pub mod truthy;
