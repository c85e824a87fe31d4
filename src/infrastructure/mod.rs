//! Infrastructure layer - external concerns

pub mod persistence;
pub mod storage;

pub use persistence::JsonSnapshotFile;
pub use storage::InMemoryReservationRepository;
