//! Mock implementation of SessionStore for testing

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::SessionRecord;
use crate::errors::{StoreError, StoreResult};

use super::r#trait::SessionStore;

/// In-memory session store for tests.
///
/// Tracks call counts so tests can assert the gate never contacts the store
/// on exempted or short-circuited paths, and supports failure injection for
/// fail-closed and sweeper-backoff scenarios.
pub struct MockSessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionRecord>>>,
    fail: Arc<AtomicBool>,
    check_calls: AtomicUsize,
    logout_calls: AtomicUsize,
    sweep_calls: AtomicUsize,
}

impl MockSessionStore {
    /// Create an empty mock store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            fail: Arc::new(AtomicBool::new(false)),
            check_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            sweep_calls: AtomicUsize::new(0),
        }
    }

    /// Insert a session record
    pub async fn insert(&self, record: SessionRecord) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(record.identity.clone(), record);
    }

    /// Fetch a session record by identity
    pub async fn get(&self, identity: &str) -> Option<SessionRecord> {
        let sessions = self.sessions.read().await;
        sessions.get(identity).cloned()
    }

    /// When set, every store operation fails with `StoreError::Unavailable`
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    /// Number of `check_inactive` calls observed
    pub fn check_inactive_calls(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    /// Number of `force_logout` calls observed
    pub fn force_logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    /// Number of `sweep_force_logout_idle` calls observed
    pub fn sweep_calls(&self) -> usize {
        self.sweep_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(StoreError::unavailable("mock store failure injected"))
        } else {
            Ok(())
        }
    }
}

impl Default for MockSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn check_inactive(&self, identity: &str, timeout_seconds: u64) -> StoreResult<bool> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(identity)
            .map(|s| s.is_idle_at(Utc::now(), timeout_seconds))
            .unwrap_or(false))
    }

    async fn force_logout(&self, identity: &str) -> StoreResult<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(identity) {
            session.force_logout();
        }
        Ok(())
    }

    async fn sweep_force_logout_idle(&self, timeout_seconds: u64) -> StoreResult<u64> {
        self.sweep_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let mut count = 0;

        for session in sessions.values_mut() {
            if session.is_idle_at(now, timeout_seconds) {
                session.force_logout();
                count += 1;
            }
        }

        Ok(count)
    }
}
