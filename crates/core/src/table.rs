//! Table validation.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::reservation::{record_id, reject_unknown_fields, whole_number};
use crate::types::DbId;

/// Keys accepted when creating a table.
pub const VALID_FIELDS: &[&str] = &["table_name", "capacity", "reservation_id"];

/// Minimum length of a table name, in characters.
pub const MIN_NAME_LENGTH: usize = 2;

/// A table payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTable {
    pub table_name: String,
    pub capacity: i32,
    /// Reservation to seat at the new table straight away, if any.
    pub reservation_id: Option<DbId>,
}

/// Validate a new table. First failing check wins.
pub fn validate_table(fields: &Map<String, Value>) -> Result<ValidTable, CoreError> {
    let table_name = match fields.get("table_name") {
        None | Some(Value::Null) => return Err(CoreError::validation("table_name is missing.")),
        Some(Value::String(s)) if s.is_empty() => {
            return Err(CoreError::validation("table_name is missing."))
        }
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(CoreError::validation("table_name must be text.")),
    };

    if table_name.chars().count() < MIN_NAME_LENGTH {
        return Err(CoreError::validation(format!(
            "table_name must be at least {MIN_NAME_LENGTH} characters long."
        )));
    }

    let capacity = match fields.get("capacity") {
        None | Some(Value::Null) => {
            return Err(CoreError::validation("Table capacity is missing."))
        }
        Some(value) => value,
    };
    if capacity.as_f64().is_some_and(|c| c < 1.0) {
        return Err(CoreError::validation("Table capacity must be at least 1."));
    }
    let capacity = whole_number(capacity)
        .and_then(|c| i32::try_from(c).ok())
        .ok_or_else(|| CoreError::validation("Table capacity must be a number."))?;

    reject_unknown_fields(fields, VALID_FIELDS)?;

    let reservation_id = match fields.get("reservation_id") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            record_id(value)
                .ok_or_else(|| CoreError::validation("reservation_id must be a number."))?,
        ),
    };

    Ok(ValidTable {
        table_name,
        capacity,
        reservation_id,
    })
}
