//! Configuration validation errors

use thiserror::Error;

/// Errors raised while assembling configuration at process startup.
///
/// Any of these aborts initialization: the gate and the sweeper must never
/// start with a missing store connection string or signing key.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required configuration value is missing or empty: {name}")]
    Missing { name: &'static str },

    #[error("Invalid configuration value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

impl ConfigError {
    /// Shortcut for a missing/empty required variable
    pub fn missing(name: &'static str) -> Self {
        Self::Missing { name }
    }
}
