//! Registry behaviour against a real Postgres.
//!
//! Run with `DATABASE_URL=postgres://… cargo test --test pg_registry -- --ignored`;
//! `sqlx::test` creates a throwaway database per test and applies the
//! migrations.

use std::sync::Arc;

use sqlx::PgPool;

use classroom_seats::registry::{PgSeatStore, SeatError, SeatStore};

async fn seeded(pool: PgPool) -> PgSeatStore {
    let store = PgSeatStore::new(pool);
    store.initialize().await.unwrap();
    store
}

#[sqlx::test(migrations = "./src/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn initialize_seeds_48_sorted_vacant_seats(pool: PgPool) {
    let store = seeded(pool).await;
    let seats = store.list_all().await.unwrap();

    assert_eq!(seats.len(), 48);
    assert!(seats.iter().all(|s| s.student_name.is_none()));
    assert_eq!(seats[0].id, "G1-T1-S1");
    assert_eq!(seats[1].id, "G1-T1-S2");
    assert_eq!(seats[47].id, "G4-T6-S2");
    assert!(seats.windows(2).all(|w| w[0].position() < w[1].position()));
}

#[sqlx::test(migrations = "./src/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn initialize_is_idempotent(pool: PgPool) {
    let store = seeded(pool).await;
    store.register("G2-T3-S1", "Anh").await.unwrap();
    store.initialize().await.unwrap();

    assert_eq!(store.list_all().await.unwrap().len(), 48);
    let seat = store.get_by_id("G2-T3-S1").await.unwrap().unwrap();
    assert_eq!(seat.student_name.as_deref(), Some("Anh"));
}

#[sqlx::test(migrations = "./src/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn register_then_conflict(pool: PgPool) {
    let store = seeded(pool).await;

    let seat = store.register("G1-T1-S1", "Anh").await.unwrap();
    assert_eq!(seat.student_name.as_deref(), Some("Anh"));
    assert_eq!(seat.group_number, 1);

    let err = store.register("G1-T1-S1", "Binh").await.unwrap_err();
    assert!(matches!(err, SeatError::Conflict(id) if id == "G1-T1-S1"));

    let seat = store.get_by_id("G1-T1-S1").await.unwrap().unwrap();
    assert_eq!(seat.student_name.as_deref(), Some("Anh"));
}

#[sqlx::test(migrations = "./src/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn unknown_seat_is_not_found_everywhere(pool: PgPool) {
    let store = seeded(pool).await;

    assert!(matches!(store.register("G9-T1-S1", "X").await, Err(SeatError::NotFound(_))));
    assert!(matches!(store.clear("G9-T1-S1").await, Err(SeatError::NotFound(_))));
    assert!(matches!(store.rename("G9-T1-S1", "X").await, Err(SeatError::NotFound(_))));
    assert!(store.get_by_id("G9-T1-S1").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./src/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn clear_is_idempotent(pool: PgPool) {
    let store = seeded(pool).await;
    store.register("G3-T2-S2", "Chi").await.unwrap();

    let seat = store.clear("G3-T2-S2").await.unwrap();
    assert!(seat.student_name.is_none());

    let seat = store.clear("G3-T2-S2").await.unwrap();
    assert!(seat.student_name.is_none());
}

#[sqlx::test(migrations = "./src/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn rename_requires_occupant(pool: PgPool) {
    let store = seeded(pool).await;
    assert!(matches!(store.rename("G1-T2-S1", "New").await, Err(SeatError::Vacant(_))));

    store.register("G1-T2-S1", "Old").await.unwrap();
    let seat = store.rename("G1-T2-S1", "New").await.unwrap();
    assert_eq!(seat.student_name.as_deref(), Some("New"));
}

#[sqlx::test(migrations = "./src/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn concurrent_registers_single_winner(pool: PgPool) {
    let store = Arc::new(seeded(pool).await);

    let attempts = (0..16).map(|i| {
        let store = store.clone();
        tokio::spawn(async move { store.register("G4-T4-S1", &format!("Student {i}")).await })
    });
    let results = futures::future::join_all(attempts).await;

    let (ok, conflicts): (Vec<_>, Vec<_>) = results
        .into_iter()
        .map(|r| r.unwrap())
        .partition(|r| r.is_ok());
    assert_eq!(ok.len(), 1);
    assert_eq!(conflicts.len(), 15);
    assert!(conflicts.iter().all(|r| matches!(r, Err(SeatError::Conflict(_)))));
}
