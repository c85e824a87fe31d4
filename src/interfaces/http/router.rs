//! HTTP router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::ReservationService;
use crate::domain::{Reservation, StoreSnapshot};

use super::modules::health::{self, HealthResponse, HealthState};
use super::modules::request_id::request_id_middleware;
use super::modules::reservations::{
    self, EditView, ListView, ReservationAppState, ReservationForm,
};

/// State shared by every route. Handlers extract their own slice of it via
/// `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReservationService>,
    pub started_at: Arc<Instant>,
}

impl FromRef<AppState> for ReservationAppState {
    fn from_ref(s: &AppState) -> Self {
        ReservationAppState {
            service: Arc::clone(&s.service),
        }
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        HealthState {
            service: Arc::clone(&s.service),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        reservations::list_reservations,
        reservations::create_reservation,
        reservations::edit_form,
        reservations::update_reservation,
        reservations::cancel_reservation,
        reservations::debug_reservations,
    ),
    components(
        schemas(
            Reservation,
            StoreSnapshot,
            ReservationForm,
            ListView,
            EditView,
            HealthResponse,
        )
    ),
    tags(
        (name = "Reservations", description = "Create, list, edit and cancel reservations"),
        (name = "Diagnostics", description = "Internal state dump, not a stable contract"),
        (name = "Health", description = "Server health check"),
    ),
    info(
        title = "Reservas Ortiz API",
        version = "1.0.0",
        description = "Reservation manager. Writes take form-encoded bodies and answer \
                       with `303 See Other`; failures travel as `?error=` on the redirect \
                       target. Reads return the view model of the page being rendered.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the application router
pub fn create_router(service: Arc<ReservationService>) -> Router {
    let state = AppState {
        service,
        started_at: Arc::new(Instant::now()),
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Reservations
        .route("/", get(reservations::list_reservations))
        .route("/reservas", post(reservations::create_reservation))
        .route(
            "/reservas/editar/{id}",
            get(reservations::edit_form).post(reservations::update_reservation),
        )
        .route("/reservas/cancelar/{id}", post(reservations::cancel_reservation))
        // Diagnostics
        .route("/__debug/reservations", get(reservations::debug_reservations))
        .with_state(state)
        // Middleware
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::infrastructure::InMemoryReservationRepository;
    use crate::interfaces::http::modules::request_id::REQUEST_ID_HEADER;

    fn router() -> Router {
        create_router(Arc::new(ReservationService::new(Arc::new(
            InMemoryReservationRepository::new(),
        ))))
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let resp = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(REQUEST_ID_HEADER));

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["reservations"], 0);
    }

    #[tokio::test]
    async fn list_route_is_mounted_at_root() {
        let resp = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let resp = router()
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn openapi_lists_reservation_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/reservas", "/reservas/editar/{id}", "/reservas/cancelar/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
