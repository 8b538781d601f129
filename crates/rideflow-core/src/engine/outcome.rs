use uuid::Uuid;

use crate::action::{ActionTicket, AsyncActionError, AsyncActionResult};
use crate::event::FlowEvent;
use crate::model::FieldErrors;
use crate::repo::FlowPosition;

/// Resultado de `submit_step` / `advance` / `resend`.
///
/// Los errores de validación y de acciones son valores, nunca pánicos.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Todos los campos inválidos del step, con su mensaje.
    Invalid(FieldErrors),
    Advanced { from: usize, to: FlowPosition },
    /// Hay una acción en curso; el flujo espera su resultado.
    AwaitingAsync { action: String, ticket: ActionTicket },
    /// La acción no se inició (cooldown, otra pendiente) o falló.
    ActionRejected(AsyncActionError),
}

impl StepOutcome {
    pub fn is_advanced(&self) -> bool {
        matches!(self, StepOutcome::Advanced { .. })
    }

    pub fn errors(&self) -> Option<&crate::model::FieldErrors> {
        match self {
            StepOutcome::Invalid(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn awaiting(&self) -> Option<(&str, ActionTicket)> {
        match self {
            StepOutcome::AwaitingAsync { action, ticket } => Some((action, *ticket)),
            _ => None,
        }
    }
}

/// Resultado de entregar la respuesta de una acción al controlador.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    Applied(AsyncActionResult),
    /// El ticket no corresponde a la acción pendiente de esta instancia.
    Discarded,
    /// Se entregó `Pending`; la acción sigue en curso.
    StillPending,
}

/// Resumen de un flujo cancelado. No conserva los valores ingresados.
#[derive(Debug, Clone)]
pub struct CancelledFlow {
    pub flow_id: Uuid,
    pub flow: String,
    pub position: FlowPosition,
    pub discarded: Option<ActionTicket>,
    pub events: Vec<FlowEvent>,
}
