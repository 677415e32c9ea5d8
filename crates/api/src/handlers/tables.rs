//! Handlers for restaurant tables and seating.
//!
//! Seating and finishing change a table and a reservation together. Both
//! writes happen in one transaction, with the table row locked first, so a
//! concurrent request on the same table sees the committed occupancy.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;
use sqlx::PgConnection;

use seatwise_core::error::CoreError;
use seatwise_core::reservation::record_id;
use seatwise_core::reservation_status::{transition, ReservationAction};
use seatwise_core::seating::{check_finish, check_seat};
use seatwise_core::table::validate_table;
use seatwise_core::types::DbId;
use seatwise_db::models::table::{CreateTable, Table};
use seatwise_db::repositories::{ReservationRepo, TableRepo};

use crate::error::{AppError, AppResult};
use crate::request::data_object;
use crate::response::DataResponse;
use crate::state::AppState;

fn table_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Table", id })
}

fn reservation_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Reservation",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /tables
// ---------------------------------------------------------------------------

pub async fn list_tables(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tables = TableRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: tables }))
}

// ---------------------------------------------------------------------------
// POST /tables
// ---------------------------------------------------------------------------

/// Create a table, optionally seating a reservation at it straight away.
pub async fn create_table(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let data = data_object(&body)?;
    let valid = validate_table(data)?;

    let mut tx = state.pool.begin().await?;
    let mut table = TableRepo::create(&mut *tx, &CreateTable::from(&valid)).await?;
    if let Some(reservation_id) = valid.reservation_id {
        table = seat(&mut tx, &table, reservation_id).await?;
    }
    tx.commit().await?;

    tracing::info!(
        table_id = table.table_id,
        capacity = table.capacity,
        reservation_id = ?table.reservation_id,
        "Table created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: table })))
}

// ---------------------------------------------------------------------------
// GET /tables/:id
// ---------------------------------------------------------------------------

pub async fn get_table(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let table = TableRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| table_not_found(id))?;

    Ok(Json(DataResponse { data: table }))
}

// ---------------------------------------------------------------------------
// PUT /tables/:id/seat
// ---------------------------------------------------------------------------

/// Seat a booked reservation at a free table with enough capacity.
pub async fn seat_table(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;

    let table = TableRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| table_not_found(id))?;

    let data = data_object(&body)?;
    let reservation_id = match data.get("reservation_id") {
        None | Some(Value::Null) => {
            return Err(AppError::BadRequest("Missing reservation_id.".into()))
        }
        Some(value) => record_id(value)
            .ok_or_else(|| CoreError::validation("reservation_id must be a number."))?,
    };

    let seated = seat(&mut tx, &table, reservation_id).await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: seated }))
}

/// Seat `reservation_id` at `table` inside the caller's transaction.
async fn seat(conn: &mut PgConnection, table: &Table, reservation_id: DbId) -> AppResult<Table> {
    let reservation = ReservationRepo::find_by_id_for_update(&mut *conn, reservation_id)
        .await?
        .ok_or_else(|| reservation_not_found(reservation_id))?;

    let status = check_seat(&table.snapshot(), &reservation.snapshot()?)?;

    ReservationRepo::update_status(&mut *conn, reservation_id, status).await?;
    let seated = TableRepo::assign(&mut *conn, table.table_id, reservation_id)
        .await?
        .ok_or_else(|| table_not_found(table.table_id))?;

    tracing::info!(
        table_id = table.table_id,
        reservation_id,
        people = reservation.people,
        "Reservation seated",
    );

    Ok(seated)
}

// ---------------------------------------------------------------------------
// DELETE /tables/:id/seat
// ---------------------------------------------------------------------------

/// Finish the reservation occupying a table and free the table.
pub async fn finish_table(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;

    let table = TableRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| table_not_found(id))?;
    let reservation_id = check_finish(&table.snapshot())?;

    let reservation = ReservationRepo::find_by_id_for_update(&mut *tx, reservation_id)
        .await?
        .ok_or_else(|| reservation_not_found(reservation_id))?;
    let status = transition(reservation_id, reservation.status()?, ReservationAction::Finish)?;

    ReservationRepo::update_status(&mut *tx, reservation_id, status).await?;
    let cleared = TableRepo::clear(&mut *tx, id)
        .await?
        .ok_or_else(|| table_not_found(id))?;
    tx.commit().await?;

    tracing::info!(table_id = id, reservation_id, "Table finished");

    Ok(Json(DataResponse { data: cleared }))
}
