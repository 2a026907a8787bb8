use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const GROUP_COUNT: i32 = 4;
pub const TABLES_PER_GROUP: i32 = 6;
pub const SEATS_PER_TABLE: i32 = 2;

/// Groups reported by the statistics, independent of what is stored.
pub const GROUP_NUMBERS: std::ops::RangeInclusive<i32> = 1..=GROUP_COUNT;

pub const MAX_STUDENT_NAME_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: String,
    pub group_number: i32,
    pub table_number: i32,
    pub seat_number: i32,
    pub student_name: Option<String>,
}

impl Seat {
    pub fn vacant(group_number: i32, table_number: i32, seat_number: i32) -> Self {
        Seat {
            id: seat_id(group_number, table_number, seat_number),
            group_number,
            table_number,
            seat_number,
            student_name: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.student_name.is_some()
    }

    pub fn position(&self) -> (i32, i32, i32) {
        (self.group_number, self.table_number, self.seat_number)
    }
}

// "G1-T2-S1"
pub fn seat_id(group_number: i32, table_number: i32, seat_number: i32) -> String {
    format!("G{}-T{}-S{}", group_number, table_number, seat_number)
}

/// Full classroom layout, every seat vacant, in (group, table, seat) order.
pub fn seed_layout() -> Vec<Seat> {
    let mut seats = Vec::with_capacity((GROUP_COUNT * TABLES_PER_GROUP * SEATS_PER_TABLE) as usize);
    for group in GROUP_NUMBERS {
        for table in 1..=TABLES_PER_GROUP {
            for seat in 1..=SEATS_PER_TABLE {
                seats.push(Seat::vacant(group, table, seat));
            }
        }
    }
    seats
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub group_number: i32,
    pub occupied: usize,
    pub available: usize,
    pub total: usize,
    pub occupancy_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatStats {
    pub total_seats: usize,
    pub occupied_seats: usize,
    pub available_seats: usize,
    pub occupancy_rate: u32,
    pub group_stats: Vec<GroupStats>,
}
