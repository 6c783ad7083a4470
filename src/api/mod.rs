//! HTTP surface consumed by the dashboard frontend.
//!
//! - [`dto`] - JSON shapes of requests and responses
//! - [`handlers`] - One handler per endpoint
//! - [`middleware`] - CORS and request tracing
//! - [`routes`] - The `/api` router

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
