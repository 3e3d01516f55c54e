//! In-memory session store with idle-timeout eviction
//!
//! Process-wide map of session id to per-conversation auth state. There is
//! no persistence: a daemon restart means every caller re-authenticates.
//! Expiry is enforced twice - lazily on every access, and by the background
//! sweeper in [`crate::sweeper`] - so an idle-expired record is never
//! observable through any read path.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Per-session authentication and conversation state
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub phone_verified: bool,
    pub nric_verified: bool,
    /// Canonical mobile bound at phone verification
    pub customer_mobile: Option<String>,
    /// Profile field cached from the directory at phone verification
    pub customer_name: Option<String>,
    pub failed_nric_attempts: u32,
    pub created_at: DateTime<Utc>,
    last_activity: Instant,
}

impl SessionRecord {
    fn new() -> Self {
        Self {
            phone_verified: false,
            nric_verified: false,
            customer_mobile: None,
            customer_name: None,
            failed_nric_attempts: 0,
            created_at: Utc::now(),
            last_activity: Instant::now(),
        }
    }

    /// Derived authentication state - never stored independently
    pub fn is_authenticated(&self) -> bool {
        self.phone_verified && self.nric_verified
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }
}

/// The session store
///
/// All access goes through [`SharedSessions`]; the store itself is not
/// thread-safe.
pub struct SessionStore {
    sessions: HashMap<Uuid, SessionRecord>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Create a fresh unverified session and return its id
    pub fn create(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(id, SessionRecord::new());
        id
    }

    /// Clone the current record, refreshing its activity timestamp.
    ///
    /// An idle-expired record is evicted and reported as absent; the caller
    /// cannot tell "expired" from "never existed", which is intentional -
    /// both mean re-authenticate.
    pub fn snapshot(&mut self, id: &Uuid) -> Option<SessionRecord> {
        if self.evict_if_expired(id) {
            return None;
        }
        let record = self.sessions.get_mut(id)?;
        record.touch();
        Some(record.clone())
    }

    /// Run a mutation against a live session, refreshing its activity
    /// timestamp. Returns None for unknown or expired ids.
    pub fn update<T>(&mut self, id: &Uuid, f: impl FnOnce(&mut SessionRecord) -> T) -> Option<T> {
        if self.evict_if_expired(id) {
            return None;
        }
        let record = self.sessions.get_mut(id)?;
        record.touch();
        Some(f(record))
    }

    /// Explicitly terminate a session. Returns false for unknown/expired ids.
    pub fn end(&mut self, id: &Uuid) -> bool {
        if self.evict_if_expired(id) {
            return false;
        }
        self.sessions.remove(id).is_some()
    }

    /// Remove every idle-expired record, returning how many were evicted
    pub fn sweep(&mut self) -> usize {
        let timeout = self.idle_timeout;
        let before = self.sessions.len();
        self.sessions.retain(|_, record| record.idle_for() <= timeout);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn evict_if_expired(&mut self, id: &Uuid) -> bool {
        let expired = match self.sessions.get(id) {
            Some(record) => record.idle_for() > self.idle_timeout,
            None => return false,
        };
        if expired {
            self.sessions.remove(id);
        }
        expired
    }
}

/// Thread-safe shared store handle
pub type SharedSessions = Arc<RwLock<SessionStore>>;

pub fn create_shared_sessions(idle_timeout: Duration) -> SharedSessions {
    Arc::new(RwLock::new(SessionStore::new(idle_timeout)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const LONG: Duration = Duration::from_secs(1800);

    #[test]
    fn test_create_and_snapshot() {
        let mut store = SessionStore::new(LONG);
        let id = store.create();

        let record = store.snapshot(&id).unwrap();
        assert!(!record.phone_verified);
        assert!(!record.nric_verified);
        assert!(!record.is_authenticated());
        assert_eq!(record.failed_nric_attempts, 0);
        assert!(record.customer_mobile.is_none());
        assert!(record.customer_name.is_none());
    }

    #[test]
    fn test_unknown_id_is_absent() {
        let mut store = SessionStore::new(LONG);
        assert!(store.snapshot(&Uuid::new_v4()).is_none());
        assert!(store.update(&Uuid::new_v4(), |_| ()).is_none());
        assert!(!store.end(&Uuid::new_v4()));
    }

    #[test]
    fn test_authenticated_is_derived() {
        let mut store = SessionStore::new(LONG);
        let id = store.create();

        store.update(&id, |r| r.phone_verified = true);
        assert!(!store.snapshot(&id).unwrap().is_authenticated());

        store.update(&id, |r| r.nric_verified = true);
        assert!(store.snapshot(&id).unwrap().is_authenticated());

        // Dropping either factor drops the derived state
        store.update(&id, |r| r.phone_verified = false);
        assert!(!store.snapshot(&id).unwrap().is_authenticated());
    }

    #[test]
    fn test_expired_session_is_gone_on_read() {
        let mut store = SessionStore::new(Duration::from_millis(10));
        let id = store.create();
        sleep(Duration::from_millis(25));

        assert!(store.snapshot(&id).is_none());
        // Eviction happened during the read, not just a hidden filter
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_expired_session_is_gone_on_update_and_end() {
        let mut store = SessionStore::new(Duration::from_millis(10));
        let a = store.create();
        let b = store.create();
        sleep(Duration::from_millis(25));

        assert!(store.update(&a, |r| r.phone_verified = true).is_none());
        assert!(!store.end(&b));
        assert!(store.is_empty());
    }

    #[test]
    fn test_touch_keeps_session_alive() {
        let mut store = SessionStore::new(Duration::from_millis(60));
        let id = store.create();

        // Keep touching inside the idle window; total elapsed time exceeds
        // the timeout but the session must survive
        for _ in 0..5 {
            sleep(Duration::from_millis(20));
            assert!(store.snapshot(&id).is_some());
        }
    }

    #[test]
    fn test_sweep_evicts_only_idle_sessions() {
        let mut store = SessionStore::new(Duration::from_millis(40));
        let stale = store.create();
        sleep(Duration::from_millis(55));
        let fresh = store.create();

        let evicted = store.sweep();
        assert_eq!(evicted, 1);
        assert!(store.snapshot(&fresh).is_some());
        assert!(store.snapshot(&stale).is_none());
    }

    #[test]
    fn test_end_removes_session() {
        let mut store = SessionStore::new(LONG);
        let id = store.create();
        assert!(store.end(&id));
        assert!(store.snapshot(&id).is_none());
        assert!(!store.end(&id));
    }

    #[test]
    fn test_update_returns_closure_result() {
        let mut store = SessionStore::new(LONG);
        let id = store.create();
        let attempts = store.update(&id, |r| {
            r.failed_nric_attempts += 1;
            r.failed_nric_attempts
        });
        assert_eq!(attempts, Some(1));
    }
}
