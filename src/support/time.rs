//! Date/time helpers for reservation instants
//!
//! Reservations carry a calendar date and a wall-clock time. Both are
//! interpreted in the server's local timezone and combined into a single
//! `NaiveDateTime` for ordering and for the future-check.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::errors::{DomainResult, ReservationError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
const TIME_FORMAT_SECONDS: &str = "%H:%M:%S";

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Accepts `HH:MM` and `HH:MM:SS`. Reservations have minute precision, so
/// any seconds are dropped.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, TIME_FORMAT_SECONDS))
        .ok()
        .and_then(|t| NaiveTime::from_hms_opt(t.hour(), t.minute(), 0))
}

pub fn combine(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Parse the date and time fields into a combined instant.
pub fn parse_instant(date: &str, time: &str) -> DomainResult<NaiveDateTime> {
    match (parse_date(date), parse_time(time)) {
        (Some(d), Some(t)) => Ok(combine(d, t)),
        _ => Err(ReservationError::InvalidTimestamp {
            date: date.to_string(),
            time: time.to_string(),
        }),
    }
}

/// `true` iff `instant` is strictly after `now`.
pub fn is_future_instant(instant: NaiveDateTime, now: NaiveDateTime) -> bool {
    instant > now
}

/// `true` iff `date`+`time` is strictly after `now`.
pub fn is_future(date: &str, time: &str, now: NaiveDateTime) -> DomainResult<bool> {
    Ok(is_future_instant(parse_instant(date, time)?, now))
}

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn today() -> NaiveDate {
    local_now().date()
}
