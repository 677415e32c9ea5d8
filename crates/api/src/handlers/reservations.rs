//! Handlers for reservations.
//!
//! Request bodies arrive as raw JSON under the `data` key and go through
//! the core validators unchanged. Status changes that touch a table run in
//! one transaction with the table row locked before the reservation row.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde_json::{Map, Value};

use seatwise_core::error::CoreError;
use seatwise_core::reservation::{reject_unknown_fields, validate_reservation};
use seatwise_core::reservation_status::{transition, ReservationAction, ReservationStatus};
use seatwise_core::search::normalize_phone_query;
use seatwise_core::types::DbId;
use seatwise_db::models::reservation::{CreateReservation, Reservation, UpdateReservation};
use seatwise_db::repositories::{ReservationRepo, TableRepo};

use crate::error::{AppError, AppResult};
use crate::query::ReservationListParams;
use crate::request::data_object;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Reservation",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /reservations
// ---------------------------------------------------------------------------

/// List reservations.
///
/// `?mobile_number=` searches by phone digits, `?date=` lists the unfinished
/// reservations for one day, and no filter lists everything.
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(params): Query<ReservationListParams>,
) -> AppResult<impl IntoResponse> {
    let reservations = if let Some(mobile_number) = params.mobile_number.as_deref() {
        match normalize_phone_query(mobile_number) {
            Some(digits) => ReservationRepo::search(&state.pool, &digits).await?,
            None => Vec::new(),
        }
    } else if let Some(raw) = params.date.as_deref() {
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest(format!("Invalid date query: {raw}.")))?;
        ReservationRepo::list_by_date(&state.pool, date).await?
    } else {
        ReservationRepo::list(&state.pool).await?
    };

    Ok(Json(DataResponse { data: reservations }))
}

// ---------------------------------------------------------------------------
// POST /reservations
// ---------------------------------------------------------------------------

/// Create a reservation. New reservations start `booked` unless the caller
/// asks for `cancelled`.
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let data = data_object(&body)?;
    let valid = validate_reservation(data, state.clock.now())?;

    let reservation = ReservationRepo::create(&state.pool, &CreateReservation::from(valid)).await?;

    tracing::info!(
        reservation_id = reservation.reservation_id,
        reservation_date = %reservation.reservation_date,
        people = reservation.people,
        "Reservation created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: reservation })))
}

// ---------------------------------------------------------------------------
// GET /reservations/:id
// ---------------------------------------------------------------------------

pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reservation = ReservationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: reservation }))
}

// ---------------------------------------------------------------------------
// PUT /reservations/:id
// ---------------------------------------------------------------------------

/// Edit a booked reservation's core fields.
///
/// Fields left out of the payload keep their stored values; the merged
/// record must still pass the booking rules. A `status` in the payload is
/// validated but not applied.
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;

    let current = ReservationRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let data = data_object(&body)?;
    transition(id, current.status()?, ReservationAction::Edit)?;

    let mut merged = stored_fields(&current);
    merged.extend(data.iter().map(|(k, v)| (k.clone(), v.clone())));
    let valid = validate_reservation(&merged, state.clock.now())?;

    let updated = ReservationRepo::update(&mut *tx, id, &UpdateReservation::from(valid))
        .await?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await?;

    tracing::info!(reservation_id = id, "Reservation updated");

    Ok(Json(DataResponse { data: updated }))
}

/// The editable fields of a stored reservation, in request form.
fn stored_fields(reservation: &Reservation) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("first_name".into(), reservation.first_name.clone().into());
    fields.insert("last_name".into(), reservation.last_name.clone().into());
    fields.insert("mobile_number".into(), reservation.mobile_number.clone().into());
    fields.insert(
        "reservation_date".into(),
        reservation.reservation_date.format("%Y-%m-%d").to_string().into(),
    );
    fields.insert(
        "reservation_time".into(),
        reservation.reservation_time.format("%H:%M:%S").to_string().into(),
    );
    fields.insert("people".into(), reservation.people.into());
    fields
}

// ---------------------------------------------------------------------------
// PUT /reservations/:id/status
// ---------------------------------------------------------------------------

/// Set a reservation's status directly.
///
/// Moving a reservation out of `seated` frees the table it occupies.
pub async fn update_reservation_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;

    let occupied = TableRepo::find_by_reservation_for_update(&mut *tx, id).await?;
    let current = ReservationRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let data = data_object(&body)?;
    let requested = data
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<ReservationStatus>().ok())
        .ok_or_else(|| AppError::BadRequest("Missing or unknown status.".into()))?;
    reject_unknown_fields(data, &["status"])?;

    let from = current.status()?;
    let to = transition(id, from, ReservationAction::SetStatus(requested))?;

    if to != ReservationStatus::Seated {
        if let Some(table) = occupied {
            TableRepo::release_reservation(&mut *tx, id).await?;
            tracing::info!(table_id = table.table_id, reservation_id = id, "Table released");
        }
    }

    let updated = ReservationRepo::update_status(&mut *tx, id, to)
        .await?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await?;

    tracing::info!(
        reservation_id = id,
        from = %from,
        to = %to,
        "Reservation status updated",
    );

    Ok(Json(DataResponse { data: updated }))
}
