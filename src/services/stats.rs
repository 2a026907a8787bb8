//! Occupancy statistics derived from a snapshot of the seat registry.
//!
//! Nothing here is stored: every call recomputes from the seats it is given.
//! Groups come from [`GROUP_NUMBERS`] rather than from the data, so a group
//! with no seats still shows up with zeroes.

use crate::models::seat::GROUP_NUMBERS;
use crate::models::{GroupStats, Seat, SeatStats};

/// Integer percentage, rounded half-up. An empty scope has a rate of 0.
pub fn occupancy_rate(occupied: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((occupied * 200 + total) / (total * 2)) as u32
}

fn count_occupied<'a>(seats: impl Iterator<Item = &'a Seat>) -> (usize, usize) {
    seats.fold((0, 0), |(total, occupied), seat| {
        (total + 1, occupied + usize::from(seat.is_occupied()))
    })
}

pub fn compute_stats(seats: &[Seat]) -> SeatStats {
    let (total_seats, occupied_seats) = count_occupied(seats.iter());

    let group_stats = GROUP_NUMBERS
        .map(|group_number| {
            let (total, occupied) =
                count_occupied(seats.iter().filter(|s| s.group_number == group_number));
            GroupStats {
                group_number,
                occupied,
                available: total - occupied,
                total,
                occupancy_rate: occupancy_rate(occupied, total),
            }
        })
        .collect();

    SeatStats {
        total_seats,
        occupied_seats,
        available_seats: total_seats - occupied_seats,
        occupancy_rate: occupancy_rate(occupied_seats, total_seats),
        group_stats,
    }
}
