//! HTTP layer for the SessionGuard server.
//!
//! Exposes the request-gate middleware, handlers and configuration so
//! integration tests can assemble the same app the binary runs.

pub mod config;
pub mod handlers;
pub mod middleware;
