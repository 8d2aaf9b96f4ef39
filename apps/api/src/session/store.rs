use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{SESSION_SWEEP_SECS_RANGE, SESSION_TTL_MINUTES_RANGE};
use crate::session::state::SessionState;

/// A session's state. Holding the lock serialises that session's interactions.
pub type SharedSession = Arc<Mutex<SessionState>>;

struct Entry {
    state: SharedSession,
    last_seen: DateTime<Utc>,
}

/// In-memory session registry keyed by cookie id. Lost on restart.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    ttl: chrono::Duration,
}

impl SessionStore {
    /// `ttl_minutes` is clamped to the range `Config` accepts.
    pub fn new(ttl_minutes: i64) -> Self {
        let ttl_minutes = ttl_minutes.clamp(
            *SESSION_TTL_MINUTES_RANGE.start(),
            *SESSION_TTL_MINUTES_RANGE.end(),
        );
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: chrono::Duration::minutes(ttl_minutes),
        }
    }

    /// Returns the session for `id`, or a fresh one under a new id when `id` is
    /// missing, unknown, or idle past the TTL.
    pub async fn load_or_create(&self, id: Option<Uuid>, now: DateTime<Utc>) -> (Uuid, SharedSession) {
        let mut sessions = self.sessions.write().await;

        if let Some(id) = id {
            if let Some(entry) = sessions.get_mut(&id) {
                if now - entry.last_seen <= self.ttl {
                    entry.last_seen = now;
                    return (id, entry.state.clone());
                }
                debug!(session = %id, "Session expired");
                sessions.remove(&id);
            }
        }

        let id = Uuid::new_v4();
        let state: SharedSession = Arc::new(Mutex::new(SessionState::default()));
        sessions.insert(
            id,
            Entry {
                state: state.clone(),
                last_seen: now,
            },
        );
        debug!(session = %id, "Session created");
        (id, state)
    }

    /// Drops sessions idle longer than the TTL. Returns how many were removed.
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_seen <= self.ttl);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Periodically evicts idle sessions for the lifetime of the process.
/// The first sweep runs immediately; intervals under a second are raised to one.
pub fn spawn_sweeper(store: SessionStore, every: Duration) -> JoinHandle<()> {
    let every = every.max(Duration::from_secs(*SESSION_SWEEP_SECS_RANGE.start()));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let evicted = store.evict_idle(Utc::now()).await;
            if evicted > 0 {
                info!("Evicted {evicted} idle sessions");
            }
        }
    })
}
