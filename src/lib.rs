//! # Reservas Ortiz
//!
//! Reservation manager for a single venue: create, list, edit and cancel
//! table reservations over HTTP.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Reservation entity, input parsing and repository traits
//! - **application**: `ReservationService` validation and use cases
//! - **infrastructure**: In-memory store and JSON snapshot file
//! - **interfaces**: HTTP router, handlers and Swagger documentation
//! - **server**: Runtime lifecycle shared by the CLI binary
//! - **support**: Errors, time parsing, serde helpers and shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export the service and router for embedding
pub use application::ReservationService;
pub use interfaces::http::create_router;
