//! Reservation model.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;
use seatwise_core::error::CoreError;
use seatwise_core::reservation::ValidReservation;
use seatwise_core::reservation_status::{self, ReservationStatus};
use seatwise_core::seating::ReservationSnapshot;
use seatwise_core::types::{DbId, Timestamp};

/// A row from the `reservations` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Reservation {
    pub reservation_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub people: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Reservation {
    /// Parsed status of the row.
    pub fn status(&self) -> Result<ReservationStatus, CoreError> {
        reservation_status::parse_stored(&self.status)
    }

    pub fn snapshot(&self) -> Result<ReservationSnapshot, CoreError> {
        Ok(ReservationSnapshot {
            reservation_id: self.reservation_id,
            people: self.people,
            status: self.status()?,
        })
    }
}

/// DTO for inserting a reservation.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub people: i32,
    pub status: ReservationStatus,
}

impl From<ValidReservation> for CreateReservation {
    fn from(valid: ValidReservation) -> Self {
        Self {
            first_name: valid.first_name,
            last_name: valid.last_name,
            mobile_number: valid.mobile_number,
            reservation_date: valid.reservation_date,
            reservation_time: valid.reservation_time,
            people: valid.people,
            status: valid.status.unwrap_or_default(),
        }
    }
}

/// DTO for editing a reservation's core fields. Status is changed only
/// through the status endpoint and the seating flows.
#[derive(Debug, Clone)]
pub struct UpdateReservation {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub people: i32,
}

impl From<ValidReservation> for UpdateReservation {
    fn from(valid: ValidReservation) -> Self {
        Self {
            first_name: valid.first_name,
            last_name: valid.last_name,
            mobile_number: valid.mobile_number,
            reservation_date: valid.reservation_date,
            reservation_time: valid.reservation_time,
            people: valid.people,
        }
    }
}
