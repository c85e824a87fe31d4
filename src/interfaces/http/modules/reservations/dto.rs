//! Reservation DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Reservation, ReservationInput};

/// Submitted reservation form (create and edit)
///
/// Every field is optional at the wire level; presence and format are
/// checked by the service so the client gets a specific error message.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationForm {
    pub client_name: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `HH:MM`
    pub time: Option<String>,
    /// Whole number; anything else counts as 1
    pub guests: Option<String>,
    pub notes: Option<String>,
    /// Mobile phone (also accepted as `celular`)
    #[serde(alias = "celular")]
    pub phone: Option<String>,
}

impl From<ReservationForm> for ReservationInput {
    fn from(form: ReservationForm) -> Self {
        Self {
            client_name: form.client_name,
            date: form.date,
            time: form.time,
            guests: form.guests,
            notes: form.notes,
            phone: form.phone,
        }
    }
}

/// `?error=` message carried over a redirect
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FlashQuery {
    pub error: Option<String>,
}

/// List page view model
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    /// Ascending by date and time
    pub reservations: Vec<Reservation>,
    pub error: Option<String>,
    /// Earliest selectable date (today)
    #[schema(value_type = String, example = "2030-12-05")]
    pub min_date: NaiveDate,
}

/// Edit page view model
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditView {
    pub reservation: Reservation,
    pub error: Option<String>,
    #[schema(value_type = String, example = "2030-12-05")]
    pub min_date: NaiveDate,
}
