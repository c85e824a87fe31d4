//! HTTP interface
//!
//! - `modules`: handlers and DTOs per resource, plus request-id middleware
//! - `router`: route table, shared state and Swagger documentation

pub mod modules;
pub mod router;

pub use router::{create_router, ApiDoc, AppState};
