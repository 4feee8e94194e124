//! Background sweeper forcing logout of idle sessions store-wide.
//!
//! A single long-running loop, started once per process, terminates idle
//! sessions even when no traffic reaches the gate. Store failures are a
//! liveness concern, never fatal: the loop logs, bumps a failure counter and
//! retries after a short fixed backoff. Shutdown is cooperative and is
//! observed both during the in-flight store call and during the wait, so it
//! is never delayed by the full interval.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::errors::StoreResult;
use crate::repositories::SessionStore;

/// Sweeper timing configuration
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Seconds between successful sweep cycles
    pub interval_seconds: u64,
    /// Inactivity threshold passed to the store, in seconds. Configured
    /// independently from the gate's threshold.
    pub timeout_seconds: u64,
    /// Seconds to wait before retrying after a store failure
    pub failure_backoff_seconds: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300,
            timeout_seconds: 120,
            failure_backoff_seconds: 5,
        }
    }
}

/// Periodic bulk-logout worker over a session store
pub struct Sweeper<S: SessionStore + 'static> {
    store: Arc<S>,
    config: SweeperConfig,
    failures: AtomicU64,
    cycles: AtomicU64,
}

impl<S: SessionStore> Sweeper<S> {
    /// Create a new sweeper over `store`
    pub fn new(store: Arc<S>, config: SweeperConfig) -> Self {
        Self {
            store,
            config,
            failures: AtomicU64::new(0),
            cycles: AtomicU64::new(0),
        }
    }

    /// Total failed cycles since startup. Exposed as the operator-facing
    /// signal for stalled cleanup.
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Total completed cycles (successful or not) since startup
    pub fn cycle_count(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Run a single sweep cycle against the store
    pub async fn run_once(&self) -> StoreResult<u64> {
        self.store
            .sweep_force_logout_idle(self.config.timeout_seconds)
            .await
    }

    /// Start the sweeper as a background task.
    ///
    /// The task stops when `shutdown` is signalled; the signal is honored
    /// even while a store call is in flight. Call at most once per process.
    pub fn spawn(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "session sweeper started: interval {}s, idle threshold {}s",
                self.config.interval_seconds, self.config.timeout_seconds
            );

            loop {
                let wait = tokio::select! {
                    _ = shutdown.changed() => break,
                    result = self.run_once() => {
                        self.cycles.fetch_add(1, Ordering::Relaxed);
                        match result {
                            Ok(count) => {
                                if count > 0 {
                                    info!("session sweep forced logout of {} idle sessions", count);
                                }
                                Duration::from_secs(self.config.interval_seconds)
                            }
                            Err(e) => {
                                self.failures.fetch_add(1, Ordering::Relaxed);
                                error!(
                                    "session sweep failed ({} failures so far), retrying in {}s: {}",
                                    self.failure_count(), self.config.failure_backoff_seconds, e
                                );
                                Duration::from_secs(self.config.failure_backoff_seconds)
                            }
                        }
                    }
                };

                tokio::select! {
                    _ = shutdown.changed() => break,
                    _ = tokio::time::sleep(wait) => {}
                }
            }

            info!("session sweeper stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SessionRecord;
    use crate::repositories::MockSessionStore;

    fn test_config() -> SweeperConfig {
        SweeperConfig {
            interval_seconds: 300,
            timeout_seconds: 120,
            failure_backoff_seconds: 5,
        }
    }

    #[tokio::test]
    async fn test_run_once_sweeps_idle_sessions() {
        let store = Arc::new(MockSessionStore::new());
        for name in ["a", "b"] {
            store
                .insert(SessionRecord::with_heartbeat_age(name, 500))
                .await;
        }
        store
            .insert(SessionRecord::with_heartbeat_age("fresh", 1))
            .await;

        let sweeper = Sweeper::new(Arc::clone(&store), test_config());
        assert_eq!(sweeper.run_once().await.unwrap(), 2);
        assert!(store.get("fresh").await.unwrap().logged_in);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_sweeps_on_each_interval() {
        let store = Arc::new(MockSessionStore::new());
        let sweeper = Arc::new(Sweeper::new(Arc::clone(&store), test_config()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = Arc::clone(&sweeper).spawn(shutdown_rx);

        // First cycle runs immediately; two more after full intervals.
        tokio::time::sleep(Duration::from_secs(301 * 2)).await;
        assert!(store.sweep_calls() >= 3);
        assert_eq!(sweeper.failure_count(), 0);

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_backs_off_and_resumes() {
        let store = Arc::new(MockSessionStore::new());
        store
            .insert(SessionRecord::with_heartbeat_age("stale", 500))
            .await;
        store.set_failing(true);

        let sweeper = Arc::new(Sweeper::new(Arc::clone(&store), test_config()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = Arc::clone(&sweeper).spawn(shutdown_rx);

        // Several failed cycles, each retried after the 5s backoff rather
        // than the 300s interval.
        tokio::time::sleep(Duration::from_secs(16)).await;
        assert!(sweeper.failure_count() >= 3);

        // Store recovers; the loop keeps running and the next cycle sweeps.
        store.set_failing(false);
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(!store.get("stale").await.unwrap().logged_in);

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_is_observed_during_wait() {
        let store = Arc::new(MockSessionStore::new());
        let sweeper = Arc::new(Sweeper::new(store, test_config()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = Arc::clone(&sweeper).spawn(shutdown_rx);

        // Let the first cycle complete, then signal mid-interval.
        tokio::time::sleep(Duration::from_secs(1)).await;
        shutdown_tx.send(true).unwrap();

        // The task must finish without waiting out the 300s interval.
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("sweeper did not observe shutdown promptly")
            .unwrap();
    }
}
