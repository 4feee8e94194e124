//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing key and algorithm configuration
//! - `database` - Session store connection and pool configuration
//! - `server` - HTTP server configuration
//! - `session` - Inactivity thresholds and sweeper timing

pub mod auth;
pub mod database;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;
