use thiserror::Error;

/// Failures of the reservation core.
///
/// `Display` is the human-readable message shown back to the client, so the
/// wording is the product's (Spanish) UI text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    #[error("El nombre del cliente no puede ser vacío.")]
    EmptyName,

    #[error("El teléfono celular no puede estar vacío.")]
    EmptyPhone,

    #[error("La reserva debe ser en una fecha y hora futura.")]
    NotFuture,

    #[error("Reserva no encontrada con id {0}")]
    NotFound(u32),

    #[error("Fecha u hora inválida: '{date}' '{time}'")]
    InvalidTimestamp { date: String, time: String },

    #[error("No quedan identificadores de reserva disponibles.")]
    IdsExhausted,

    #[error("Error de persistencia: {0}")]
    PersistenceFailure(String),
}

impl ReservationError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Input-validation failures, as opposed to lookup or I/O failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyName | Self::EmptyPhone | Self::NotFuture | Self::InvalidTimestamp { .. }
        )
    }
}

impl From<std::io::Error> for ReservationError {
    fn from(err: std::io::Error) -> Self {
        Self::PersistenceFailure(err.to_string())
    }
}

impl From<serde_json::Error> for ReservationError {
    fn from(err: serde_json::Error) -> Self {
        Self::PersistenceFailure(err.to_string())
    }
}

/// Result type for reservation operations
pub type DomainResult<T> = Result<T, ReservationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_carries_id() {
        let err = ReservationError::NotFound(42);
        assert!(err.is_not_found());
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Reserva no encontrada con id 42");
    }

    #[test]
    fn validation_variants_are_classified() {
        assert!(ReservationError::EmptyName.is_validation());
        assert!(ReservationError::EmptyPhone.is_validation());
        assert!(ReservationError::NotFuture.is_validation());
        assert!(ReservationError::InvalidTimestamp {
            date: "x".into(),
            time: "y".into()
        }
        .is_validation());
        assert!(!ReservationError::PersistenceFailure("disk".into()).is_validation());
        assert!(!ReservationError::IdsExhausted.is_validation());
    }

    #[test]
    fn io_errors_become_persistence_failures() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ReservationError = io.into();
        assert!(matches!(err, ReservationError::PersistenceFailure(ref m) if m.contains("denied")));
    }
}
