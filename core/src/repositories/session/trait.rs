//! Session store trait defining the interface to per-identity session state.

use async_trait::async_trait;

use crate::errors::StoreResult;

/// Contract for the remote session store.
///
/// The store owns the authoritative clock: inactivity is always evaluated
/// against the store host's time, never the caller's, so clock skew between
/// the gate's host and the store cannot skew the decision.
///
/// # Concurrency
/// Implementations must update each identity's row atomically. The gate and
/// the sweeper may force-logout the same identity concurrently; because the
/// logged-in to logged-out transition is monotone and both operations are
/// idempotent, no coordination beyond per-row atomicity is required.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Check whether `identity`'s session is idle.
    ///
    /// A session is idle when it is logged in and its last heartbeat is
    /// older than `timeout_seconds`, measured on the store's clock.
    ///
    /// # Returns
    /// * `Ok(true)` - session is idle and should be terminated
    /// * `Ok(false)` - session is active (or already logged out / unknown)
    /// * `Err(StoreError)` - store unreachable or query failed
    async fn check_inactive(&self, identity: &str, timeout_seconds: u64) -> StoreResult<bool>;

    /// Mark `identity`'s session logged out.
    ///
    /// Idempotent: invoking it repeatedly has no effect beyond the first
    /// call, and it never reverses a logout.
    async fn force_logout(&self, identity: &str) -> StoreResult<()>;

    /// Force logout of every idle session store-wide.
    ///
    /// Idempotent and safe to run concurrently with per-identity
    /// `force_logout` calls.
    ///
    /// # Returns
    /// * `Ok(count)` - number of sessions transitioned by this call
    async fn sweep_force_logout_idle(&self, timeout_seconds: u64) -> StoreResult<u64>;
}
