//! Session store connection pool construction

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use sg_shared::config::DatabaseConfig;

/// Build a MySQL connection pool from configuration.
///
/// Connectivity is verified eagerly so a bad connection string aborts
/// startup instead of surfacing on the first request.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .connect(&config.url)
        .await?;

    info!(
        "session store pool ready ({} max connections)",
        config.max_connections
    );

    Ok(pool)
}
