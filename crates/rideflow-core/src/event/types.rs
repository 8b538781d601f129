//! Tipos de evento del flujo y estructura `FlowEvent`.
//!
//! Cada transición del `FlowController` emite un evento a un `EventStore`
//! append-only. Es un diario de diagnóstico: el estado vivo está en el
//! `FlowInstance` y nada se persiste al terminar el wizard.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::{ActionTicket, AsyncActionResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowEventKind {
    /// Primer evento de un `flow_id`.
    FlowStarted { flow: String, definition_hash: String, step_count: usize },
    StepSubmitted { step_index: usize, step_key: String },
    /// La validación rechazó el envío; `fields` lista todos los campos inválidos.
    ValidationFailed { step_index: usize, step_key: String, fields: Vec<String> },
    ActionRequested { step_index: usize, action: String, ticket: ActionTicket },
    /// Invocación rechazada por cooldown o por otra acción en curso.
    ActionRejected { step_index: usize, action: String, reason: String },
    ActionResolved {
        step_index: usize,
        action: String,
        ticket: ActionTicket,
        result: AsyncActionResult,
    },
    /// Una acción pendiente fue abandonada (retroceso/cancelación).
    ActionDiscarded { ticket: ActionTicket },
    StepAdvanced { from: usize, to: usize },
    StepRetreated { from: usize, to: usize },
    FlowCompleted { values_fingerprint: String },
    FlowCancelled { step_index: Option<usize> },
}

impl FlowEventKind {
    /// Código compacto de una letra (útil en asserts de secuencia).
    pub fn code(&self) -> &'static str {
        match self {
            FlowEventKind::FlowStarted { .. } => "I",
            FlowEventKind::StepSubmitted { .. } => "S",
            FlowEventKind::ValidationFailed { .. } => "V",
            FlowEventKind::ActionRequested { .. } => "A",
            FlowEventKind::ActionRejected { .. } => "J",
            FlowEventKind::ActionResolved { .. } => "R",
            FlowEventKind::ActionDiscarded { .. } => "D",
            FlowEventKind::StepAdvanced { .. } => "F",
            FlowEventKind::StepRetreated { .. } => "B",
            FlowEventKind::FlowCompleted { .. } => "C",
            FlowEventKind::FlowCancelled { .. } => "X",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEvent {
    pub seq: u64, // asignado por el EventStore (orden append)
    pub flow_id: Uuid,
    pub kind: FlowEventKind,
    pub ts: DateTime<Utc>,
}
