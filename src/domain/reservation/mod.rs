//! Reservation aggregate
//!
//! Contains the Reservation entity, related types, and the store/snapshot
//! interfaces.

pub mod model;
pub mod repository;

pub use model::{
    normalize_guests, Reservation, ReservationDraft, ReservationInput, ReservationListing,
    StoreSnapshot, DEFAULT_GUESTS,
};
pub use repository::{ReservationRepository, SnapshotStore};
