//! Reservation HTTP handlers
//!
//! Reads render a view model; writes answer with a `303 See Other` redirect,
//! carrying any failure as an `?error=` message.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum::{Form, Json};

use crate::application::ReservationService;
use crate::domain::StoreSnapshot;
use crate::support::time;

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub service: Arc<ReservationService>,
}

const LIST_PATH: &str = "/";
const CREATE_ERROR_PREFIX: &str = "¡Error!";
const EDIT_ERROR_PREFIX: &str = "¡Error al editar!";
const EDIT_NOT_FOUND_MESSAGE: &str = "Reserva no encontrada al intentar editar.";

fn edit_path(id: u32) -> String {
    format!("/reservas/editar/{}", id)
}

/// Redirect to `target` with `message` in the `error` query parameter.
fn redirect_with_error(target: &str, message: &str) -> Redirect {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    Redirect::to(&format!("{}?error={}", target, encoded))
}

/// Ids arrive as free text; anything that is not a positive integer simply
/// matches no reservation.
fn parse_id(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|&id| id > 0)
}

fn not_found_message(raw_id: &str) -> String {
    format!("Reserva no encontrada con id {}", raw_id)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Reservations",
    params(FlashQuery),
    responses(
        (status = 200, description = "Reservations sorted by date and time", body = ListView)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    Query(flash): Query<FlashQuery>,
) -> Json<ListView> {
    let listing = state.service.list(time::local_now()).await;
    Json(ListView {
        reservations: listing.reservations,
        error: flash.error,
        min_date: listing.today,
    })
}

#[utoipa::path(
    post,
    path = "/reservas",
    tag = "Reservations",
    request_body(content = ReservationForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the list; `?error=` set on failure")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    Form(form): Form<ReservationForm>,
) -> Redirect {
    match state.service.create(form.into(), time::local_now()).await {
        Ok(_) => Redirect::to(LIST_PATH),
        Err(e) => redirect_with_error(LIST_PATH, &format!("{} {}", CREATE_ERROR_PREFIX, e)),
    }
}

#[utoipa::path(
    get,
    path = "/reservas/editar/{id}",
    tag = "Reservations",
    params(("id" = u32, Path, description = "Reservation ID"), FlashQuery),
    responses(
        (status = 200, description = "Edit form view model", body = EditView),
        (status = 303, description = "Unknown reservation; redirect to the list with an error")
    )
)]
pub async fn edit_form(
    State(state): State<ReservationAppState>,
    Path(raw_id): Path<String>,
    Query(flash): Query<FlashQuery>,
) -> Result<Json<EditView>, Redirect> {
    let not_found = || redirect_with_error(LIST_PATH, &not_found_message(&raw_id));

    let id = parse_id(&raw_id).ok_or_else(not_found)?;
    let reservation = state.service.find(id).await.map_err(|_| not_found())?;

    Ok(Json(EditView {
        reservation,
        error: flash.error,
        min_date: time::today(),
    }))
}

#[utoipa::path(
    post,
    path = "/reservas/editar/{id}",
    tag = "Reservations",
    params(("id" = u32, Path, description = "Reservation ID")),
    request_body(content = ReservationForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the list on success, back to the edit form on failure")
    )
)]
pub async fn update_reservation(
    State(state): State<ReservationAppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<ReservationForm>,
) -> Redirect {
    let Some(id) = parse_id(&raw_id) else {
        return redirect_with_error(LIST_PATH, EDIT_NOT_FOUND_MESSAGE);
    };

    match state.service.edit(id, form.into(), time::local_now()).await {
        Ok(_) => Redirect::to(LIST_PATH),
        Err(e) if e.is_validation() => {
            redirect_with_error(&edit_path(id), &format!("{} {}", EDIT_ERROR_PREFIX, e))
        }
        Err(e) if e.is_not_found() => redirect_with_error(LIST_PATH, EDIT_NOT_FOUND_MESSAGE),
        Err(e) => redirect_with_error(LIST_PATH, &format!("{} {}", EDIT_ERROR_PREFIX, e)),
    }
}

#[utoipa::path(
    post,
    path = "/reservas/cancelar/{id}",
    tag = "Reservations",
    params(("id" = u32, Path, description = "Reservation ID")),
    responses(
        (status = 303, description = "Always redirects to the list")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    Path(raw_id): Path<String>,
) -> Redirect {
    if let Some(id) = parse_id(&raw_id) {
        state.service.cancel(id).await;
    }
    Redirect::to(LIST_PATH)
}

#[utoipa::path(
    get,
    path = "/__debug/reservations",
    tag = "Diagnostics",
    responses(
        (status = 200, description = "Internal store state, verbatim", body = StoreSnapshot)
    )
)]
pub async fn debug_reservations(State(state): State<ReservationAppState>) -> Json<StoreSnapshot> {
    Json(state.service.debug_dump().await)
}

// ── Tests ──────────────────────────────────────────────────────
