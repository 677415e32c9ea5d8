pub mod health;
pub mod reservations;
pub mod tables;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /reservations                                list (?date, ?mobile_number), create
/// /reservations/{reservation_id}               get, update
/// /reservations/{reservation_id}/status        update status
///
/// /tables                                      list, create
/// /tables/{table_id}                           get
/// /tables/{table_id}/seat                      seat (PUT), finish (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/reservations", reservations::router())
        .nest("/tables", tables::router())
}
