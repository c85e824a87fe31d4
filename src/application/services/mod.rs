//! Application services

mod reservation;

pub use reservation::ReservationService;
