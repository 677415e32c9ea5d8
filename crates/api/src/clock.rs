//! Wall-clock source for time-dependent booking rules.

use chrono::{Local, NaiveDateTime};

/// Where handlers read the current local time from.
///
/// Production uses [`Clock::System`]; tests pin the time with
/// [`Clock::Fixed`] so "must be in the future" checks are deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(at) => *at,
        }
    }
}
