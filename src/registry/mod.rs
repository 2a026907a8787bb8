//! Seat registry: the single source of truth for who sits where.
//!
//! Only three mutations exist. `register` claims a vacant seat, `clear`
//! empties one and `rename` replaces the name on an occupied one. Seats are
//! seeded once by `initialize` and never added or removed afterwards.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::Seat;

pub use memory::MemorySeatStore;
pub use postgres::PgSeatStore;

#[derive(Debug, thiserror::Error)]
pub enum SeatError {
    #[error("seat {0} does not exist")]
    NotFound(String),
    #[error("seat {0} is already occupied")]
    Conflict(String),
    #[error("seat {0} has no student to rename")]
    Vacant(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type SeatResult<T> = Result<T, SeatError>;

/// Names passed to `register`/`rename` are expected to be trimmed and
/// length-checked already.
#[async_trait]
pub trait SeatStore: Send + Sync {
    /// Seeds the full layout when the registry is empty, otherwise does nothing.
    async fn initialize(&self) -> SeatResult<()>;

    /// All seats ordered by (group, table, seat).
    async fn list_all(&self) -> SeatResult<Vec<Seat>>;

    async fn get_by_id(&self, seat_id: &str) -> SeatResult<Option<Seat>>;

    /// First come, first served: fails with `Conflict` if someone already sits here.
    async fn register(&self, seat_id: &str, student_name: &str) -> SeatResult<Seat>;

    /// Empties the seat. Clearing a vacant seat succeeds.
    async fn clear(&self, seat_id: &str) -> SeatResult<Seat>;

    async fn rename(&self, seat_id: &str, student_name: &str) -> SeatResult<Seat>;
}
