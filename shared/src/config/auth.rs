//! Authentication configuration

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// JWT verification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret key used to verify token signatures
    pub secret: String,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: default_algorithm(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Create from environment variables.
    ///
    /// Fails fast when `JWT_SECRET` is absent or empty: the gate must not
    /// start without a signing key to verify against.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        if secret.trim().is_empty() {
            return Err(ConfigError::missing("JWT_SECRET"));
        }

        Ok(Self {
            jwt: JwtConfig::new(secret),
        })
    }

    /// Get the JWT verification secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}
