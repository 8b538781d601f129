//! Errores específicos del core.
//!
//! `CoreEngineError` agrupa violaciones de invariantes (errores de
//! programación) y errores al construir definiciones. Los errores de
//! validación y de acciones asíncronas NO viven aquí: se devuelven como
//! valores dentro de `StepOutcome`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreEngineError {
    #[error("flow already completed")] FlowCompleted,
    #[error("cannot retreat from the first step")] RetreatFromFirstStep,
    #[error("projection requested before the flow completed")] NotCompleted,
    #[error("flow definition has no steps")] EmptyDefinition,
    #[error("duplicate step key: {0}")] DuplicateStep(String),
    #[error("field '{0}' is owned by more than one step")] DuplicateField(String),
    #[error("flow definition has no receipt projector")] MissingProjector,
    #[error("internal: {0}")] Internal(String),
}

/// Falla ruidosamente ante una violación de invariante.
///
/// Las operaciones públicas del controlador (`advance`, `retreat`,
/// `projection`, ...) delegan aquí cuando su variante `try_*` devuelve error.
#[track_caller]
pub(crate) fn invariant_violation(err: CoreEngineError) -> ! {
    log::error!("invariant violation: {err}");
    panic!("invariant violation: {err}")
}
