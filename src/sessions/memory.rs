use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{SessionError, SessionId, SessionStore};

pub struct MemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<SessionId, Instant>>,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self) -> Result<SessionId, SessionError> {
        let id = SessionId::generate();
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        // drop whatever has expired while we hold the lock anyway
        sessions.retain(|_, expires_at| *expires_at > now);
        sessions.insert(id, now + self.ttl);
        Ok(id)
    }

    async fn is_admin(&self, id: &SessionId) -> Result<bool, SessionError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(id)
            .is_some_and(|expires_at| *expires_at > Instant::now()))
    }

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionError> {
        self.sessions.write().await.remove(id);
        Ok(())
    }
}
