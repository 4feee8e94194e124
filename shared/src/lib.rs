//! Shared configuration types for the SessionGuard server
//!
//! This crate provides the configuration surface used across all server
//! modules:
//! - Database, authentication, session, and HTTP server configuration
//! - Startup validation errors

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{AuthConfig, DatabaseConfig, JwtConfig, ServerConfig, SessionConfig};
pub use errors::ConfigError;
