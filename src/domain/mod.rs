pub mod reservation;

// Re-export commonly used types
pub use reservation::{
    Reservation, ReservationDraft, ReservationInput, ReservationListing, ReservationRepository,
    SnapshotStore, StoreSnapshot,
};

pub use crate::support::errors::{DomainResult, ReservationError};
