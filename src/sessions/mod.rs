//! Server-side admin sessions. The client only ever holds the opaque id.

pub mod memory;
pub mod redis_store;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use uuid::Uuid;

pub use self::memory::MemorySessionStore;
pub use self::redis_store::RedisSessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(SessionId)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Opens a new admin session.
    async fn create(&self) -> Result<SessionId, SessionError>;

    /// True while the session exists and has not expired.
    async fn is_admin(&self, id: &SessionId) -> Result<bool, SessionError>;

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionError>;
}
