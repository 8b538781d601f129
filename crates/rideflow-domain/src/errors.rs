// errors.rs
use rideflow_core::CoreEngineError;
use thiserror::Error;

/// Errores del catálogo de flujos de la app.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("unknown flow: {0}")]
    UnknownFlow(String),

    #[error("invalid flow definition: {0}")]
    Definition(#[from] CoreEngineError),

    #[error("invalid booking type: {0}")]
    InvalidBookingType(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}
