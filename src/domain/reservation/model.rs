//! Reservation domain entity

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::support::errors::{DomainResult, ReservationError};
use crate::support::time;

/// Guest count used when the submitted value is absent, non-numeric or zero.
pub const DEFAULT_GUESTS: u32 = 1;

fn default_guests() -> u32 {
    DEFAULT_GUESTS
}

/// One booking.
///
/// This is also the snapshot-file record: unknown fields are ignored and the
/// optional ones default, so older or hand-edited files still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Store-assigned identifier, never reused
    pub id: u32,
    pub client_name: String,
    #[schema(value_type = String, example = "2030-12-05")]
    pub date: NaiveDate,
    #[serde(with = "crate::support::serializations::hhmm")]
    #[schema(value_type = String, example = "14:00")]
    pub time: NaiveTime,
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default, alias = "celular")]
    pub phone: String,
}

impl Reservation {
    pub fn from_draft(id: u32, draft: ReservationDraft) -> Self {
        Self {
            id,
            client_name: draft.client_name,
            date: draft.date,
            time: draft.time,
            guests: draft.guests,
            notes: draft.notes,
            phone: draft.phone,
        }
    }

    /// Combined date + time, used for ordering and the future-check
    pub fn instant(&self) -> NaiveDateTime {
        time::combine(self.date, self.time)
    }
}

/// A validated record without an id; what the store inserts or writes over
/// an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    pub client_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: u32,
    pub notes: String,
    pub phone: String,
}

impl ReservationDraft {
    /// Validate presence and timestamp format, then normalize.
    ///
    /// Checks run in a fixed order (name, phone, timestamp) so the first
    /// failing field is always the one reported. Whether the instant lies in
    /// the future is left to the caller.
    pub fn parse(input: &ReservationInput) -> DomainResult<Self> {
        let client_name = non_blank(input.client_name.as_deref()).ok_or(ReservationError::EmptyName)?;
        let phone = non_blank(input.phone.as_deref()).ok_or(ReservationError::EmptyPhone)?;

        let raw_date = input.date.as_deref().unwrap_or_default();
        let raw_time = input.time.as_deref().unwrap_or_default();
        let instant = time::parse_instant(raw_date, raw_time)?;

        Ok(Self {
            client_name,
            date: instant.date(),
            time: instant.time(),
            guests: normalize_guests(input.guests.as_deref()),
            notes: input.notes.clone().unwrap_or_default(),
            phone,
        })
    }

    pub fn instant(&self) -> NaiveDateTime {
        time::combine(self.date, self.time)
    }
}

/// Raw request fields, as submitted by a form. Nothing here is trusted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationInput {
    pub client_name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub guests: Option<String>,
    pub notes: Option<String>,
    pub phone: Option<String>,
}

/// Verbatim internal state of the store, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub reservations: Vec<Reservation>,
    pub next_id: u32,
}

/// Sorted reservations plus today's date (minimum selectable date in forms).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationListing {
    pub reservations: Vec<Reservation>,
    pub today: NaiveDate,
}

/// Parse a guest count, falling back to [`DEFAULT_GUESTS`] when the value is
/// missing, not a whole number, or zero.
pub fn normalize_guests(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_GUESTS)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

// ── Tests ──────────────────────────────────────────────────────
