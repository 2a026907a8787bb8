use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::info;

use super::{SessionError, SessionId, SessionStore};
use crate::redis_client::RedisClient;

/// Sessions kept as `admin_session:{id}` keys with a TTL, shared by every
/// instance pointing at the same Redis.
#[derive(Clone)]
pub struct RedisSessionStore {
    redis: RedisClient,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(redis: RedisClient, ttl_seconds: u64) -> Self {
        Self { redis, ttl_seconds }
    }

    fn key(id: &SessionId) -> String {
        format!("admin_session:{}", id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self) -> Result<SessionId, SessionError> {
        let id = SessionId::generate();
        let mut conn = self.redis.conn.clone();
        let _: () = conn.set_ex(Self::key(&id), 1, self.ttl_seconds).await?;
        Ok(id)
    }

    async fn is_admin(&self, id: &SessionId) -> Result<bool, SessionError> {
        let mut conn = self.redis.conn.clone();
        let exists: bool = conn.exists(Self::key(id)).await?;
        Ok(exists)
    }

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionError> {
        let mut conn = self.redis.conn.clone();
        let _: () = conn.del(Self::key(id)).await?;
        info!("Destroyed admin session {}", id);
        Ok(())
    }
}
