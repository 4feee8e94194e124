//! Session record entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Persisted per-identity session state.
///
/// The store owns the authoritative copy; this entity exists for the mock
/// store and for reasoning about transitions. While logged in, the heartbeat
/// is non-decreasing; the logged-in to logged-out transition is monotone and
/// never reversed by the gate or the sweeper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Identity key (the token subject)
    pub identity: String,

    /// Last heartbeat timestamp
    pub last_heartbeat: DateTime<Utc>,

    /// Whether the session is currently logged in
    pub logged_in: bool,
}

impl SessionRecord {
    /// Creates a freshly logged-in session with the heartbeat set to now
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            last_heartbeat: Utc::now(),
            logged_in: true,
        }
    }

    /// Creates a session whose heartbeat lies `age_seconds` in the past
    pub fn with_heartbeat_age(identity: impl Into<String>, age_seconds: i64) -> Self {
        Self {
            identity: identity.into(),
            last_heartbeat: Utc::now() - Duration::seconds(age_seconds),
            logged_in: true,
        }
    }

    /// Records a heartbeat. Heartbeats never move backwards.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        if self.logged_in && at > self.last_heartbeat {
            self.last_heartbeat = at;
        }
    }

    /// Whether the session counts as idle at `now` for the given threshold.
    ///
    /// A logged-out session is already terminated and is never reported
    /// idle again.
    pub fn is_idle_at(&self, now: DateTime<Utc>, timeout_seconds: u64) -> bool {
        self.logged_in
            && now.signed_duration_since(self.last_heartbeat)
                > Duration::seconds(timeout_seconds as i64)
    }

    /// Marks the session logged out. Idempotent.
    pub fn force_logout(&mut self) {
        self.logged_in = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_active() {
        let session = SessionRecord::new("alice");
        assert!(session.logged_in);
        assert!(!session.is_idle_at(Utc::now(), 120));
    }

    #[test]
    fn test_stale_heartbeat_is_idle() {
        let session = SessionRecord::with_heartbeat_age("alice", 121);
        assert!(session.is_idle_at(Utc::now(), 120));
    }

    #[test]
    fn test_heartbeat_exactly_at_threshold_is_not_idle() {
        let session = SessionRecord::with_heartbeat_age("alice", 120);
        let now = session.last_heartbeat + Duration::seconds(120);
        assert!(!session.is_idle_at(now, 120));
    }

    #[test]
    fn test_force_logout_is_idempotent() {
        let mut session = SessionRecord::with_heartbeat_age("alice", 500);
        session.force_logout();
        let after_first = session.clone();

        session.force_logout();
        assert_eq!(session, after_first);
        assert!(!session.logged_in);
    }

    #[test]
    fn test_logged_out_session_is_never_idle() {
        let mut session = SessionRecord::with_heartbeat_age("alice", 500);
        session.force_logout();
        assert!(!session.is_idle_at(Utc::now(), 120));
    }

    #[test]
    fn test_touch_never_moves_backwards() {
        let mut session = SessionRecord::new("alice");
        let original = session.last_heartbeat;
        session.touch(original - Duration::seconds(30));
        assert_eq!(session.last_heartbeat, original);

        let later = original + Duration::seconds(30);
        session.touch(later);
        assert_eq!(session.last_heartbeat, later);
    }
}
