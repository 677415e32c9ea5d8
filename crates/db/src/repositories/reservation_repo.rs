//! Repository for the `reservations` table.

use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool};
use seatwise_core::reservation_status::ReservationStatus;
use seatwise_core::search::PHONE_FORMATTING_CHARS;
use seatwise_core::types::DbId;

use crate::models::reservation::{CreateReservation, Reservation, UpdateReservation};

/// Column list for `reservations` queries.
const COLUMNS: &str = "\
    reservation_id, first_name, last_name, mobile_number, \
    reservation_date, reservation_time, people, status, \
    created_at, updated_at";

/// Provides CRUD operations for reservations.
pub struct ReservationRepo;

impl ReservationRepo {
    /// List every reservation, ordered by time of day.
    pub async fn list(pool: &PgPool) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations \
             ORDER BY reservation_time, reservation_date, reservation_id"
        );
        sqlx::query_as::<_, Reservation>(&query).fetch_all(pool).await
    }

    /// List reservations on `date` that have not finished, ordered by time.
    pub async fn list_by_date(
        pool: &PgPool,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations \
             WHERE reservation_date = $1 AND status <> $2 \
             ORDER BY reservation_time, reservation_id"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(date)
            .bind(ReservationStatus::Finished.as_str())
            .fetch_all(pool)
            .await
    }

    /// Find reservations whose mobile number, with formatting stripped,
    /// contains `digits`. Ordered by date.
    ///
    /// `digits` must already be reduced to ASCII digits (see
    /// `seatwise_core::search::normalize_phone_query`).
    pub async fn search(pool: &PgPool, digits: &str) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations \
             WHERE translate(mobile_number, $1, '') LIKE $2 \
             ORDER BY reservation_date, reservation_time, reservation_id"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(PHONE_FORMATTING_CHARS)
            .bind(format!("%{digits}%"))
            .fetch_all(pool)
            .await
    }

    /// Find a reservation by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE reservation_id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a reservation by ID and lock the row until the surrounding
    /// transaction ends.
    pub async fn find_by_id_for_update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations WHERE reservation_id = $1 FOR UPDATE"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Insert a new reservation, returning the full row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReservation,
    ) -> Result<Reservation, sqlx::Error> {
        let query = format!(
            "INSERT INTO reservations \
                (first_name, last_name, mobile_number, \
                 reservation_date, reservation_time, people, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.mobile_number)
            .bind(input.reservation_date)
            .bind(input.reservation_time)
            .bind(input.people)
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Replace a reservation's core fields. Status is left untouched.
    /// Returns `None` if the reservation does not exist.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateReservation,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "UPDATE reservations SET \
                first_name = $1, last_name = $2, mobile_number = $3, \
                reservation_date = $4, reservation_time = $5, people = $6 \
             WHERE reservation_id = $7 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.mobile_number)
            .bind(input.reservation_date)
            .bind(input.reservation_time)
            .bind(input.people)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Set the status of a reservation. Returns `None` if it does not exist.
    pub async fn update_status<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        status: ReservationStatus,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "UPDATE reservations SET status = $1 WHERE reservation_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
