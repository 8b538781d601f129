//! Estado mutable de una ejecución de un `FlowDefinition`.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::{ActionTicket, AsyncActionResult};
use crate::model::FieldValues;

/// Posición del flujo. Invariante: `AtStep(i)` con `0 <= i < len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowPosition {
    AtStep(usize),
    Complete,
}

impl FlowPosition {
    pub fn index(&self) -> Option<usize> {
        match self {
            FlowPosition::AtStep(i) => Some(*i),
            FlowPosition::Complete => None,
        }
    }
}

/// Resultado registrado de una acción terminada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub step_index: usize,
    pub action: String,
    pub ticket: ActionTicket,
    pub fingerprint: String,
    pub result: AsyncActionResult,
}

/// Instancia viva de un wizard. No se persiste: se descarta al completar,
/// cancelar o abandonar la pantalla.
#[derive(Debug, Clone)]
pub struct FlowInstance {
    pub id: Uuid,
    pub position: FlowPosition,
    /// Sólo se agregan o sobrescriben valores; nunca se eliminan a mitad de flujo.
    pub values: FieldValues,
    pub actions: Vec<ActionRecord>,
}

impl FlowInstance {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4(),
               position: FlowPosition::AtStep(0),
               values: FieldValues::new(),
               actions: Vec::new() }
    }

    pub fn merge(&mut self, values: FieldValues) {
        for (k, v) in values {
            self.values.insert(k, v);
        }
    }

    /// ¿Terminó `action` con éxito en `step_index` para exactamente estos valores?
    pub fn has_success(&self, step_index: usize, action: &str, fingerprint: &str) -> bool {
        self.actions.iter().any(|r| {
                               r.step_index == step_index
                               && r.action == action
                               && r.fingerprint == fingerprint
                               && r.result.is_success()
                           })
    }

    /// Último resultado registrado en un step.
    pub fn last_result(&self, step_index: usize) -> Option<&ActionRecord> {
        self.actions.iter().rev().find(|r| r.step_index == step_index)
    }

    /// Invalida los resultados de acciones de `from` en adelante.
    pub fn clear_actions_from(&mut self, from: usize) {
        self.actions.retain(|r| r.step_index < from);
    }
}

impl Default for FlowInstance {
    fn default() -> Self {
        Self::new()
    }
}
