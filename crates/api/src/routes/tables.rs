//! Route definitions for restaurant tables.
//!
//! Mounted at `/tables` by `api_routes()`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::tables;
use crate::state::AppState;

/// Table routes.
///
/// ```text
/// GET    /                  -> list_tables
/// POST   /                  -> create_table
/// GET    /{id}              -> get_table
/// PUT    /{id}/seat         -> seat_table
/// DELETE /{id}/seat         -> finish_table
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tables::list_tables).post(tables::create_table))
        .route("/{id}", get(tables::get_table))
        .route(
            "/{id}/seat",
            put(tables::seat_table).delete(tables::finish_table),
        )
}
