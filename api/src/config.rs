//! Application configuration assembly

use sg_shared::config::{AuthConfig, DatabaseConfig, ServerConfig, SessionConfig};
use sg_shared::errors::ConfigError;

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub session: SessionConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Assemble configuration from environment variables.
    ///
    /// Aborts startup (returns an error) when the store connection string
    /// or the token signing key is absent or empty; everything else falls
    /// back to documented defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            session: SessionConfig::from_env(),
            server: ServerConfig::from_env(),
        })
    }
}
