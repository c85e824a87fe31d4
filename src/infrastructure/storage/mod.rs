//! Reservation store implementations

mod memory;

pub use memory::InMemoryReservationRepository;
