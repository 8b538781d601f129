use rideflow_core::CoreEngineError;
use rideflow_domain::DomainError;
use thiserror::Error;

/// Errores de la aplicación (CLI y scripts).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("engine error: {0}")]
    Engine(#[from] CoreEngineError),
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("usage: {0}")]
    Usage(String),
}
