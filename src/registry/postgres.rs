use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, warn};

use super::{SeatError, SeatResult, SeatStore};
use crate::models::seat::seed_layout;
use crate::models::Seat;

const SEAT_COLUMNS: &str = "id, group_number, table_number, seat_number, student_name";

/// Registry backed by the `seats` table. Occupancy changes are single
/// conditional UPDATEs, so the row lock taken by Postgres is what makes
/// `register` first-come-first-served across connections.
#[derive(Clone)]
pub struct PgSeatStore {
    pool: PgPool,
}

impl PgSeatStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn seat_exists(&self, seat_id: &str) -> SeatResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM seats WHERE id = $1)")
            .bind(seat_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

#[async_trait]
impl SeatStore for PgSeatStore {
    async fn initialize(&self) -> SeatResult<()> {
        let mut tx = self.pool.begin().await?;

        let seeded = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM seats)")
            .fetch_one(&mut *tx)
            .await?;
        if seeded {
            tx.rollback().await?;
            return Ok(());
        }

        let layout = seed_layout();
        for seat in &layout {
            sqlx::query(
                r#"
                INSERT INTO seats (id, group_number, table_number, seat_number, student_name)
                VALUES ($1, $2, $3, $4, NULL)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(&seat.id)
            .bind(seat.group_number)
            .bind(seat.table_number)
            .bind(seat.seat_number)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!("Seeded {} seats", layout.len());
        Ok(())
    }

    async fn list_all(&self) -> SeatResult<Vec<Seat>> {
        let seats = sqlx::query_as::<_, Seat>(&format!(
            "SELECT {SEAT_COLUMNS} FROM seats ORDER BY group_number, table_number, seat_number"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(seats)
    }

    async fn get_by_id(&self, seat_id: &str) -> SeatResult<Option<Seat>> {
        let seat = sqlx::query_as::<_, Seat>(&format!("SELECT {SEAT_COLUMNS} FROM seats WHERE id = $1"))
            .bind(seat_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(seat)
    }

    async fn register(&self, seat_id: &str, student_name: &str) -> SeatResult<Seat> {
        // claim only if still vacant
        let claimed = sqlx::query_as::<_, Seat>(&format!(
            "UPDATE seats SET student_name = $2 WHERE id = $1 AND student_name IS NULL RETURNING {SEAT_COLUMNS}"
        ))
        .bind(seat_id)
        .bind(student_name)
        .fetch_optional(&self.pool)
        .await?;

        let Some(seat) = claimed else {
            if self.seat_exists(seat_id).await? {
                warn!("Seat {} already taken, rejecting {}", seat_id, student_name);
                return Err(SeatError::Conflict(seat_id.to_string()));
            }
            return Err(SeatError::NotFound(seat_id.to_string()));
        };

        info!("Seat {} registered to {}", seat_id, student_name);
        Ok(seat)
    }

    async fn clear(&self, seat_id: &str) -> SeatResult<Seat> {
        let seat = sqlx::query_as::<_, Seat>(&format!(
            "UPDATE seats SET student_name = NULL WHERE id = $1 RETURNING {SEAT_COLUMNS}"
        ))
        .bind(seat_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| SeatError::NotFound(seat_id.to_string()))?;

        info!("Seat {} cleared", seat_id);
        Ok(seat)
    }

    async fn rename(&self, seat_id: &str, student_name: &str) -> SeatResult<Seat> {
        let renamed = sqlx::query_as::<_, Seat>(&format!(
            "UPDATE seats SET student_name = $2 WHERE id = $1 AND student_name IS NOT NULL RETURNING {SEAT_COLUMNS}"
        ))
        .bind(seat_id)
        .bind(student_name)
        .fetch_optional(&self.pool)
        .await?;

        let Some(seat) = renamed else {
            if self.seat_exists(seat_id).await? {
                return Err(SeatError::Vacant(seat_id.to_string()));
            }
            return Err(SeatError::NotFound(seat_id.to_string()));
        };

        info!("Seat {} renamed to {}", seat_id, student_name);
        Ok(seat)
    }
}
