use redis::{aio::MultiplexedConnection, Client};
use tracing::info;

use crate::config::RedisConfig;
use crate::sessions::RedisSessionStore;

/// Cheap to clone; every clone multiplexes over one connection.
#[derive(Clone)]
pub struct RedisClient {
    pub conn: MultiplexedConnection,
}

impl RedisClient {
    pub async fn connect(config: &RedisConfig) -> redis::RedisResult<Self> {
        let client = Client::open(config.url.as_str())?;
        let conn = client.get_multiplexed_tokio_connection().await?;
        info!("Redis connected");
        Ok(RedisClient { conn })
    }

    pub fn session_store(&self, ttl_seconds: u64) -> RedisSessionStore {
        RedisSessionStore::new(self.clone(), ttl_seconds)
    }
}
