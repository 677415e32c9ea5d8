use std::sync::Arc;

use crate::clock::Clock;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: seatwise_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Source of "now" for the booking rules.
    pub clock: Clock,
}
