pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod middleware;
pub mod models;
pub mod redis_client;
pub mod registry;
pub mod services;
pub mod sessions;

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use sha2::{Digest, Sha256};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use registry::{MemorySeatStore, SeatStore};
use sessions::{MemorySessionStore, SessionStore};

// Shared state for the whole application
pub struct AppState {
    pub seats: Arc<dyn SeatStore>,
    pub sessions: Arc<dyn SessionStore>,
    admin_password_digest: [u8; 32],
    pub config: config::Config,
}

impl AppState {
    /// Connects the configured backends (Postgres / Redis, falling back to
    /// memory) and seeds the seat layout.
    pub async fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let seats: Arc<dyn SeatStore> = match &config.database {
            Some(db_config) => {
                let db = database::Database::connect(db_config).await?;
                db.run_migrations().await?;
                Arc::new(db.seat_store())
            }
            None => {
                info!("DATABASE_URL not set, keeping seats in memory");
                Arc::new(MemorySeatStore::new())
            }
        };

        let sessions: Arc<dyn SessionStore> = match &config.redis {
            Some(redis_config) => {
                let redis = redis_client::RedisClient::connect(redis_config).await?;
                Arc::new(redis.session_store(config.admin.session_ttl_seconds))
            }
            None => {
                info!("REDIS_URL not set, keeping admin sessions in memory");
                Arc::new(MemorySessionStore::new(Duration::from_secs(
                    config.admin.session_ttl_seconds,
                )))
            }
        };

        Self::with_stores(config, seats, sessions).await
    }

    /// Builds the state around already constructed stores.
    pub async fn with_stores(
        config: config::Config,
        seats: Arc<dyn SeatStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> anyhow::Result<Arc<Self>> {
        if config.admin.uses_default_password() {
            warn!("Using default ADMIN_PASSWORD. Set ADMIN_PASSWORD environment variable for production.");
        }
        let admin_password_digest = password_digest(&config.admin.password);

        seats.initialize().await?;

        Ok(Arc::new(Self {
            seats,
            sessions,
            admin_password_digest,
            config,
        }))
    }

    /// Full-length comparison against the configured admin password.
    pub fn password_matches(&self, candidate: &str) -> bool {
        constant_time_eq::constant_time_eq(&password_digest(candidate), &self.admin_password_digest)
    }

    /// Memory-only state, used by tests and local runs.
    pub async fn in_memory(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let ttl = Duration::from_secs(config.admin.session_ttl_seconds);
        Self::with_stores(
            config,
            Arc::new(MemorySeatStore::new()),
            Arc::new(MemorySessionStore::new(ttl)),
        )
        .await
    }
}

fn password_digest(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Classroom Seats API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
