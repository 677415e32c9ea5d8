//! Reservation validation.
//!
//! [`validate_reservation`] is the single gate every create and edit passes
//! through. It checks the candidate record against a fixed, ordered list of
//! rules and stops at the first failure, so the caller always gets exactly
//! one reason back.
//!
//! Rule order:
//!
//! 1. unknown fields
//! 2. `first_name`, 3. `last_name`, 4. `mobile_number`
//! 5. `reservation_date` format
//! 6. closed on Tuesdays
//! 7. after closing (21:30), 8. before opening (10:30)
//! 9. `reservation_time` format
//! 10. must be in the future
//! 11. `people`
//! 12. `status` may not be set to an already-progressed value
//!
//! Checks 7 and 8 run before the time format check and only look at the
//! leading `hour:minute` pair. A malformed string such as `25:00` therefore
//! reports the closing-time message, not the format message. Clients rely on
//! these messages, so the order is kept as is.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::reservation_status::ReservationStatus;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Keys accepted in a reservation payload. Read-only keys are tolerated so a
/// client can send back a record it previously fetched.
pub const VALID_FIELDS: &[&str] = &[
    "first_name",
    "last_name",
    "mobile_number",
    "reservation_date",
    "reservation_time",
    "people",
    "status",
    "reservation_id",
    "created_at",
    "updated_at",
];

/// Day of the week the restaurant is closed.
pub const CLOSED_DAY: Weekday = Weekday::Tue;

/// First bookable minute of the day (10:30).
pub const OPENING_MINUTE: i64 = 10 * 60 + 30;

/// Last bookable minute of the day (21:30).
pub const CLOSING_MINUTE: i64 = 21 * 60 + 30;

const DATE_PATTERN: &str = r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[1-2][0-9]|3[0-1])$";
const TIME_PATTERN: &str = r"^([01]?[0-9]|2[0-3]):([0-5][0-9])(?::([0-5][0-9]))?$";

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATE_PATTERN).expect("valid regex"));
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIME_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A reservation payload that passed every rule, with its fields parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReservation {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub people: i32,
    /// Initial status requested by the caller. Only `booked` or `cancelled`
    /// can get this far.
    pub status: Option<ReservationStatus>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a candidate reservation against the booking rules.
///
/// `now` is the current local wall-clock time; it is a parameter so the
/// "must be in the future" rule can be tested deterministically.
pub fn validate_reservation(
    fields: &Map<String, Value>,
    now: NaiveDateTime,
) -> Result<ValidReservation, CoreError> {
    reject_unknown_fields(fields, VALID_FIELDS)?;

    let first_name = required_text(
        fields,
        "first_name",
        "Must provide a first_name for the reservation.",
    )?;
    let last_name = required_text(
        fields,
        "last_name",
        "Must provide a last_name for the reservation.",
    )?;
    let mobile_number = required_text(fields, "mobile_number", "mobile_number must be provided.")?;

    let reservation_date = fields
        .get("reservation_date")
        .and_then(Value::as_str)
        .and_then(parse_date)
        .ok_or_else(|| CoreError::validation("Invalid reservation_date."))?;

    if reservation_date.weekday() == CLOSED_DAY {
        return Err(CoreError::validation("Restaurant is closed on Tuesdays."));
    }

    let raw_time = fields.get("reservation_time").and_then(Value::as_str);

    if let Some(minute) = raw_time.and_then(minute_of_day) {
        if minute > CLOSING_MINUTE {
            return Err(CoreError::validation(
                "Restaurant stops accepting reservations past 9:30PM.",
            ));
        }
        if minute < OPENING_MINUTE {
            return Err(CoreError::validation(
                "Restaurant begins accepting reservations starting 10:30AM.",
            ));
        }
    }

    let reservation_time = raw_time
        .and_then(parse_time)
        .ok_or_else(|| CoreError::validation("Invalid reservation_time."))?;

    if reservation_date.and_time(reservation_time) <= now {
        return Err(CoreError::validation(
            "Can only accept future dates for reservations.",
        ));
    }

    let people = fields
        .get("people")
        .and_then(whole_number)
        .filter(|n| *n >= 1)
        .ok_or_else(|| CoreError::validation("Number of people must be greater than 0."))?;
    let people = i32::try_from(people).map_err(|_| {
        CoreError::validation(format!("Number of people must be at most {}.", i32::MAX))
    })?;

    let status = requested_status(fields.get("status"))?;

    Ok(ValidReservation {
        first_name,
        last_name,
        mobile_number,
        reservation_date,
        reservation_time,
        people,
        status,
    })
}

/// Reject a payload carrying keys outside `allowed`, naming every offender.
pub fn reject_unknown_fields(fields: &Map<String, Value>, allowed: &[&str]) -> Result<(), CoreError> {
    let invalid: Vec<&str> = fields
        .keys()
        .map(String::as_str)
        .filter(|key| !allowed.contains(key))
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(CoreError::validation(format!(
            "Invalid field(s): {}",
            invalid.join(", ")
        )))
    }
}

/// Interpret a JSON value as a whole number. `4` and `4.0` qualify, `2.5` and
/// `"4"` do not.
pub fn whole_number(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(n) = number.as_i64() {
        return Some(n);
    }
    number
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

/// Interpret a JSON value as a record id. Accepts whatever [`whole_number`]
/// accepts, plus a string of ASCII digits such as `"5"`, which clients send
/// when the id comes from a URL segment.
pub fn record_id(value: &Value) -> Option<DbId> {
    match value {
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().ok()
        }
        other => whole_number(other),
    }
}

fn required_text(
    fields: &Map<String, Value>,
    key: &str,
    message: &'static str,
) -> Result<String, CoreError> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CoreError::validation(message))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if !DATE_RE.is_match(raw) {
        return None;
    }
    // The pattern admits impossible days such as 02-30.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let caps = TIME_RE.captures(raw)?;
    let hour = caps.get(1)?.as_str().parse().ok()?;
    let minute = caps.get(2)?.as_str().parse().ok()?;
    let second = match caps.get(3) {
        Some(s) => s.as_str().parse().ok()?,
        None => 0,
    };
    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Minute of the day for the leading `hour:minute` of `raw`, ignoring seconds.
///
/// Out-of-range components are not clamped: `25:00` is 1500 and `09:75` is
/// 615. Returns `None` when either component is not an integer.
fn minute_of_day(raw: &str) -> Option<i64> {
    let mut parts = raw.split(':');
    let hour: i64 = parts.next()?.trim().parse().ok()?;
    let minute: i64 = parts.next()?.trim().parse().ok()?;
    hour.checked_mul(60)?.checked_add(minute)
}

fn requested_status(value: Option<&Value>) -> Result<Option<ReservationStatus>, CoreError> {
    let raw = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            return Err(CoreError::validation(format!("Unknown status: {other}.")));
        }
    };

    match raw.parse::<ReservationStatus>() {
        Ok(ReservationStatus::Seated) => Err(CoreError::validation(
            "Reservation has already been seated.",
        )),
        Ok(ReservationStatus::Finished) => {
            Err(CoreError::validation("Reservation has already finished."))
        }
        Ok(status) => Ok(Some(status)),
        Err(e) => Err(CoreError::validation(e.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
