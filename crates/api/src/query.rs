//! Query parameter types for API handlers.

use serde::Deserialize;

/// Filters for `GET /reservations`.
///
/// `mobile_number` wins when both are given. Dates are kept as raw strings
/// so a malformed value can be echoed back in the error message.
#[derive(Debug, Default, Deserialize)]
pub struct ReservationListParams {
    pub date: Option<String>,
    pub mobile_number: Option<String>,
}
