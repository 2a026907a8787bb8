use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{SeatError, SeatResult, SeatStore};
use crate::models::seat::seed_layout;
use crate::models::Seat;

/// Process-local registry. Every mutation holds the write guard for the whole
/// check-then-set, so two claims on one seat are serialized.
#[derive(Default)]
pub struct MemorySeatStore {
    seats: RwLock<HashMap<String, Seat>>,
}

impl MemorySeatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with arbitrary seats, bypassing `initialize`.
    pub fn with_seats(seats: impl IntoIterator<Item = Seat>) -> Self {
        let seats = seats.into_iter().map(|s| (s.id.clone(), s)).collect();
        Self { seats: RwLock::new(seats) }
    }
}

#[async_trait]
impl SeatStore for MemorySeatStore {
    async fn initialize(&self) -> SeatResult<()> {
        let mut seats = self.seats.write().await;
        if !seats.is_empty() {
            return Ok(());
        }
        seats.extend(seed_layout().into_iter().map(|s| (s.id.clone(), s)));
        info!("Seeded {} seats", seats.len());
        Ok(())
    }

    async fn list_all(&self) -> SeatResult<Vec<Seat>> {
        let mut all: Vec<Seat> = self.seats.read().await.values().cloned().collect();
        all.sort_by_key(Seat::position);
        Ok(all)
    }

    async fn get_by_id(&self, seat_id: &str) -> SeatResult<Option<Seat>> {
        Ok(self.seats.read().await.get(seat_id).cloned())
    }

    async fn register(&self, seat_id: &str, student_name: &str) -> SeatResult<Seat> {
        let mut seats = self.seats.write().await;
        let seat = seats
            .get_mut(seat_id)
            .ok_or_else(|| SeatError::NotFound(seat_id.to_string()))?;

        if seat.is_occupied() {
            warn!("Seat {} already taken, rejecting {}", seat_id, student_name);
            return Err(SeatError::Conflict(seat_id.to_string()));
        }

        seat.student_name = Some(student_name.to_string());
        info!("Seat {} registered to {}", seat_id, student_name);
        Ok(seat.clone())
    }

    async fn clear(&self, seat_id: &str) -> SeatResult<Seat> {
        let mut seats = self.seats.write().await;
        let seat = seats
            .get_mut(seat_id)
            .ok_or_else(|| SeatError::NotFound(seat_id.to_string()))?;

        seat.student_name = None;
        info!("Seat {} cleared", seat_id);
        Ok(seat.clone())
    }

    async fn rename(&self, seat_id: &str, student_name: &str) -> SeatResult<Seat> {
        let mut seats = self.seats.write().await;
        let seat = seats
            .get_mut(seat_id)
            .ok_or_else(|| SeatError::NotFound(seat_id.to_string()))?;

        if !seat.is_occupied() {
            return Err(SeatError::Vacant(seat_id.to_string()));
        }

        seat.student_name = Some(student_name.to_string());
        info!("Seat {} renamed to {}", seat_id, student_name);
        Ok(seat.clone())
    }
}
