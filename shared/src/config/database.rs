//! Session store database configuration

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Database configuration for the MySQL session store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,
}

impl DatabaseConfig {
    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            connect_timeout: default_connect_timeout(),
            idle_timeout: default_idle_timeout(),
        }
    }

    /// Create from environment variables.
    ///
    /// Fails fast when `DATABASE_URL` is absent or empty: both the gate and
    /// the sweeper depend on the session store being reachable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("DATABASE_URL").unwrap_or_default();
        if url.trim().is_empty() {
            return Err(ConfigError::missing("DATABASE_URL"));
        }

        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| default_max_connections().to_string())
            .parse()
            .unwrap_or_else(|_| default_max_connections());

        Ok(Self {
            url,
            max_connections,
            connect_timeout: default_connect_timeout(),
            idle_timeout: default_idle_timeout(),
        })
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_new() {
        let config = DatabaseConfig::new("mysql://localhost:3306/sessions");
        assert_eq!(config.url, "mysql://localhost:3306/sessions");
        assert_eq!(config.max_connections, 10);
    }

    #[test]
    fn test_with_max_connections() {
        let config = DatabaseConfig::new("mysql://db/sessions").with_max_connections(32);
        assert_eq!(config.max_connections, 32);
    }

    #[test]
    fn test_from_env_rejects_missing_url() {
        std::env::remove_var("DATABASE_URL");
        let result = DatabaseConfig::from_env();
        assert!(matches!(result, Err(ConfigError::Missing { name }) if name == "DATABASE_URL"));
    }
}
