//! Session inactivity and sweeper timing configuration

use serde::{Deserialize, Serialize};

/// Fixed backoff applied between sweeper cycles after a store failure
pub const SWEEP_FAILURE_BACKOFF_SECONDS: u64 = 5;

/// Session activity enforcement configuration
///
/// The gate's inactivity timeout and the sweeper's timeout are configured
/// independently; operators should normally keep them consistent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Gate-side inactivity timeout in seconds; a session whose last
    /// heartbeat is older than this is rejected at the gate
    #[serde(default = "default_inactivity_timeout")]
    pub inactivity_timeout: u64,

    /// How often the sweeper runs, in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval: u64,

    /// Inactivity threshold the sweeper applies store-wide, in seconds
    #[serde(default = "default_sweep_timeout")]
    pub sweep_timeout: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout: default_inactivity_timeout(),
            sweep_interval: default_sweep_interval(),
            sweep_timeout: default_sweep_timeout(),
        }
    }
}

impl SessionConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            inactivity_timeout: env_u64("SESSION_INACTIVITY_TIMEOUT", default_inactivity_timeout()),
            sweep_interval: env_u64("SWEEP_INTERVAL", default_sweep_interval()),
            sweep_timeout: env_u64("SWEEP_INACTIVITY_TIMEOUT", default_sweep_timeout()),
        }
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_inactivity_timeout() -> u64 {
    120
}

fn default_sweep_interval() -> u64 {
    300
}

fn default_sweep_timeout() -> u64 {
    120
}
