use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Resultado etiquetado de una acción con efectos secundarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum AsyncActionResult {
    Pending,
    Succeeded(Value),
    Failed(String),
}

impl AsyncActionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AsyncActionResult::Succeeded(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AsyncActionResult::Pending)
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            AsyncActionResult::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Identifica una invocación concreta. Incluye el `flow_id` dueño para que un
/// resultado nunca pueda aplicarse a otra instancia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionTicket {
    pub flow_id: Uuid,
    pub id: Uuid,
}

impl ActionTicket {
    pub(crate) fn issue(flow_id: Uuid) -> Self {
        Self { flow_id,
               id: Uuid::new_v4() }
    }
}

impl fmt::Display for ActionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.flow_id, self.id)
    }
}

/// Errores recuperables de acciones. Nunca hacen avanzar el flujo.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsyncActionError {
    #[error("cooldown: '{action}' may be invoked again in {remaining_secs}s")]
    Cooldown { action: String, remaining_secs: i64 },
    #[error("action '{action}' is already pending")]
    AlreadyPending { action: String },
    #[error("stale action ticket {0}")]
    StaleTicket(ActionTicket),
    #[error("action '{action}' failed: {reason}")]
    Failed { action: String, reason: String },
    #[error("current step has no action to resend")]
    NothingToResend,
}

impl AsyncActionError {
    /// Motivo corto y estable, apto para mostrar/traducir en la UI.
    pub fn reason(&self) -> &'static str {
        match self {
            AsyncActionError::Cooldown { .. } => "cooldown",
            AsyncActionError::AlreadyPending { .. } => "pending",
            AsyncActionError::StaleTicket(_) => "stale",
            AsyncActionError::Failed { .. } => "failed",
            AsyncActionError::NothingToResend => "no-action",
        }
    }
}
