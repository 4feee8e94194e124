//! MySQL implementation of the SessionStore trait.
//!
//! All inactivity comparisons run inside SQL against the database server's
//! clock (`NOW()`), never the gate host's, so clock skew between hosts
//! cannot skew gate or sweeper decisions.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use tracing::debug;

use sg_core::errors::{StoreError, StoreResult};
use sg_core::repositories::SessionStore;

/// MySQL-backed session store over the `user_sessions` table
///
/// Expected schema:
/// ```sql
/// CREATE TABLE user_sessions (
///     identity       VARCHAR(128) PRIMARY KEY,
///     last_heartbeat DATETIME     NOT NULL,
///     logged_in      BOOLEAN      NOT NULL DEFAULT TRUE
/// );
/// ```
pub struct MySqlSessionStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSessionStore {
    /// Create a new MySQL session store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn map_err(e: sqlx::Error) -> StoreError {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                StoreError::unavailable(e.to_string())
            }
            other => StoreError::query(other.to_string()),
        }
    }
}

#[async_trait]
impl SessionStore for MySqlSessionStore {
    async fn check_inactive(&self, identity: &str, timeout_seconds: u64) -> StoreResult<bool> {
        // The comparison runs on the store's clock. Unknown or already
        // logged-out identities are not idle; they have nothing left to
        // terminate.
        let query = r#"
            SELECT CAST(
                (logged_in AND TIMESTAMPDIFF(SECOND, last_heartbeat, NOW()) > ?) AS SIGNED
            ) AS idle
            FROM user_sessions
            WHERE identity = ?
        "#;

        let row = sqlx::query(query)
            .bind(timeout_seconds)
            .bind(identity)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::map_err)?;

        match row {
            Some(row) => {
                // MySQL evaluates the boolean expression to a 0/1 integer.
                let idle: i64 = row.try_get("idle").map_err(Self::map_err)?;
                Ok(idle != 0)
            }
            None => Ok(false),
        }
    }

    async fn force_logout(&self, identity: &str) -> StoreResult<()> {
        // Plain monotone flag flip; re-running it matches no rows.
        let query = "UPDATE user_sessions SET logged_in = FALSE WHERE identity = ? AND logged_in = TRUE";

        let result = sqlx::query(query)
            .bind(identity)
            .execute(&self.pool)
            .await
            .map_err(Self::map_err)?;

        if result.rows_affected() > 0 {
            debug!("forced logout of session {}", identity);
        }

        Ok(())
    }

    async fn sweep_force_logout_idle(&self, timeout_seconds: u64) -> StoreResult<u64> {
        let query = r#"
            UPDATE user_sessions
            SET logged_in = FALSE
            WHERE logged_in = TRUE
              AND TIMESTAMPDIFF(SECOND, last_heartbeat, NOW()) > ?
        "#;

        let result = sqlx::query(query)
            .bind(timeout_seconds)
            .execute(&self.pool)
            .await
            .map_err(Self::map_err)?;

        Ok(result.rows_affected())
    }
}
