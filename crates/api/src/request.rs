//! Request envelope handling.
//!
//! Clients send `{ "data": { ... } }`. Bodies are taken as raw JSON and
//! unwrapped here so the validators see the submitted object exactly,
//! including unknown keys and mistyped values.

use serde_json::{Map, Value};

use crate::error::AppError;

/// Borrow the `data` object out of a request body.
pub fn data_object(body: &Value) -> Result<&Map<String, Value>, AppError> {
    body.get("data")
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::BadRequest("Data is missing.".into()))
}
