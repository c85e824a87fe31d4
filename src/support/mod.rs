pub mod errors;
pub mod serializations;
pub mod shutdown;
pub mod time;

pub use errors::{DomainResult, ReservationError};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
