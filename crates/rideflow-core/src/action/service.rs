//! Contrato con el colaborador externo que ejecuta los efectos secundarios.

use async_trait::async_trait;

use super::{ActionTicket, AsyncActionResult};
use crate::model::FieldValues;

/// Servicio externo (backend, gateway SMS, pasarela de pago).
///
/// Una llamada, un resultado: no hay política de reintentos incorporada; los
/// reintentos son decisión del llamador. Nunca debe devolver `Pending`.
#[async_trait]
pub trait ActionService: Send + Sync {
    async fn invoke(&self, action: &str, payload: &FieldValues) -> AsyncActionResult;
}

/// Acción iniciada por el controlador y lista para ejecutarse. Se entrega una
/// sola vez (ver `FlowController::take_dispatch`).
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDispatch {
    pub ticket: ActionTicket,
    pub action: String,
    pub payload: FieldValues,
}
