//! Acciones asíncronas que condicionan el avance de un step.
//!
//! - `AsyncActionResult`: resultado etiquetado (`Pending`/`Succeeded`/`Failed`).
//! - `AsyncActionAdapter`: una acción en curso por flujo, cooldown tras éxito.
//! - `ActionService`: contrato con el colaborador externo (SMS, banco, pagos).
//! - `Clock`: fuente de tiempo inyectable para los cooldowns.

mod adapter;
mod clock;
mod result;
mod service;

pub use adapter::{ActionPolicy, AsyncActionAdapter, PendingAction};
pub use clock::{Clock, ManualClock, SystemClock};
pub use result::{ActionTicket, AsyncActionError, AsyncActionResult};
pub use service::{ActionDispatch, ActionService};
