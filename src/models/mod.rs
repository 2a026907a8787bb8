pub mod seat;

pub use seat::{GroupStats, Seat, SeatStats};
