//! Domain logic for the reservation backend.
//!
//! Everything in this crate is pure: no database, no HTTP, no clock reads.
//! Callers pass in the current wall-clock time where a rule depends on it.

pub mod error;
pub mod reservation;
pub mod reservation_status;
pub mod search;
pub mod seating;
pub mod table;
pub mod types;
