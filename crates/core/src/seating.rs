//! Cross-checks between table occupancy and reservation status.
//!
//! A table is `free` when it references no reservation and `occupied`
//! otherwise. Occupancy changes only through two operations, and each one
//! also moves the referenced reservation:
//!
//! | Operation | Table | Reservation |
//! |-----------|-------|-------------|
//! | seat | free -> occupied | booked -> seated |
//! | finish | occupied -> free | seated -> finished |
//!
//! The functions here decide whether an operation may proceed, using
//! snapshots the caller has already loaded. They never write.

use crate::error::CoreError;
use crate::reservation_status::{transition, ReservationAction, ReservationStatus};
use crate::types::DbId;

/// The parts of a table row the seating rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSnapshot {
    pub table_id: DbId,
    pub capacity: i32,
    pub reservation_id: Option<DbId>,
}

impl TableSnapshot {
    pub fn is_occupied(&self) -> bool {
        self.reservation_id.is_some()
    }
}

/// The parts of a reservation row the seating rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationSnapshot {
    pub reservation_id: DbId,
    pub people: i32,
    pub status: ReservationStatus,
}

/// Check that `reservation` can be seated at `table`.
///
/// Returns the status the reservation moves to.
pub fn check_seat(
    table: &TableSnapshot,
    reservation: &ReservationSnapshot,
) -> Result<ReservationStatus, CoreError> {
    if let Some(occupant) = table.reservation_id {
        return Err(CoreError::validation(format!(
            "Table already occupied by reservation_id: {occupant}."
        )));
    }

    if table.capacity < reservation.people {
        return Err(CoreError::validation(format!(
            "Table capacity ({}) is less than the party size ({}).",
            table.capacity, reservation.people
        )));
    }

    transition(
        reservation.reservation_id,
        reservation.status,
        ReservationAction::Seat,
    )
}

/// Check that `table` can be cleared. Returns the id of the reservation
/// currently occupying it.
pub fn check_finish(table: &TableSnapshot) -> Result<DbId, CoreError> {
    table
        .reservation_id
        .ok_or_else(|| CoreError::validation("Table is not occupied."))
}
