//! Reservation status values and the transition table.
//!
//! Every flow that changes a reservation's status (seating a table, clearing
//! a table, a direct status update, a field edit) goes through
//! [`transition`], so the rules live in one place.
//!
//! ```text
//! booked ──seat──▶ seated ──finish──▶ finished
//!    │                │
//!    └────cancel──────┴──────────────▶ cancelled
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_BOOKED: &str = "booked";
pub const STATUS_SEATED: &str = "seated";
pub const STATUS_FINISHED: &str = "finished";
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid reservation statuses, in lifecycle order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_BOOKED,
    STATUS_SEATED,
    STATUS_FINISHED,
    STATUS_CANCELLED,
];

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Initial state, awaiting seating.
    #[default]
    Booked,
    /// Currently occupying a table.
    Seated,
    /// Completed and vacated. Terminal.
    Finished,
    /// Withdrawn before completion. Terminal.
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Booked => STATUS_BOOKED,
            Self::Seated => STATUS_SEATED,
            Self::Finished => STATUS_FINISHED,
            Self::Cancelled => STATUS_CANCELLED,
        }
    }

    /// Whether no further transition is permitted out of this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of [`VALID_STATUSES`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown status: {0}.")]
pub struct UnknownStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_BOOKED => Ok(Self::Booked),
            STATUS_SEATED => Ok(Self::Seated),
            STATUS_FINISHED => Ok(Self::Finished),
            STATUS_CANCELLED => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Parse a status read back from storage.
///
/// The column carries a CHECK constraint, so an unknown value here means the
/// schema and this enum have drifted apart.
pub fn parse_stored(status: &str) -> Result<ReservationStatus, CoreError> {
    status
        .parse()
        .map_err(|e: UnknownStatus| CoreError::Internal(format!("Stored reservation {e}")))
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// A requested change to a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationAction {
    /// Assign the reservation to a free table.
    Seat,
    /// Clear the table the reservation occupies.
    Finish,
    /// Direct status update.
    SetStatus(ReservationStatus),
    /// Change the reservation's core fields (name, phone, date, time, party size).
    Edit,
}

/// Apply `action` to a reservation currently in `current`.
///
/// Returns the status the reservation must be stored with on success. The
/// check is performed before any write; a rejection means nothing is mutated.
pub fn transition(
    reservation_id: DbId,
    current: ReservationStatus,
    action: ReservationAction,
) -> Result<ReservationStatus, CoreError> {
    use ReservationStatus::*;

    match (current, action) {
        (Finished, _) => Err(CoreError::validation(format!(
            "Reservation ID {reservation_id} has already finished."
        ))),
        (Cancelled, _) => Err(CoreError::validation(format!(
            "Reservation ID {reservation_id} has been cancelled."
        ))),

        (Booked, ReservationAction::Seat) => Ok(Seated),
        (Seated, ReservationAction::Seat) => Err(CoreError::validation(format!(
            "Reservation ID {reservation_id} has already been seated."
        ))),

        // Finishing from booked releases a table left pointing at a
        // reservation that was never marked seated.
        (Booked | Seated, ReservationAction::Finish) => Ok(Finished),

        (Booked, ReservationAction::Edit) => Ok(Booked),
        (Seated, ReservationAction::Edit) => Err(CoreError::validation(format!(
            "Reservation ID {reservation_id} is seated and can no longer be edited."
        ))),

        // Staff may correct a live reservation to any status, including
        // re-asserting the current one.
        (Booked | Seated, ReservationAction::SetStatus(to)) => Ok(to),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
