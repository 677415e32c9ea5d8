//! Route definitions for reservations.
//!
//! Mounted at `/reservations` by `api_routes()`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::reservations;
use crate::state::AppState;

/// Reservation routes.
///
/// ```text
/// GET    /                  -> list_reservations
/// POST   /                  -> create_reservation
/// GET    /{id}              -> get_reservation
/// PUT    /{id}              -> update_reservation
/// PUT    /{id}/status       -> update_reservation_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/{id}",
            get(reservations::get_reservation).put(reservations::update_reservation),
        )
        .route("/{id}/status", put(reservations::update_reservation_status))
}
