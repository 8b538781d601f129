use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::debug;
use uuid::Uuid;

use super::{ActionTicket, AsyncActionError, AsyncActionResult, Clock};
use crate::constants::DEFAULT_RESEND_COOLDOWN_SECS;

/// Cooldown por acción tras un `Succeeded`.
///
/// Sólo las acciones de reenvío (las que algún step declara con `resends`)
/// llevan `resend_cooldown`; el resto puede repetirse de inmediato salvo
/// que `with_cooldown` diga otra cosa.
#[derive(Debug, Clone)]
pub struct ActionPolicy {
    resend_cooldown: Duration,
    resend_actions: HashSet<String>,
    per_action: HashMap<String, Duration>,
}

impl ActionPolicy {
    pub fn new(resend_cooldown: Duration) -> Self {
        Self { resend_cooldown,
               resend_actions: HashSet::new(),
               per_action: HashMap::new() }
    }

    /// Marca `action` como acción de reenvío.
    pub fn resends(mut self, action: impl Into<String>) -> Self {
        self.resend_actions.insert(action.into());
        self
    }

    pub fn with_cooldown(mut self, action: impl Into<String>, cooldown: Duration) -> Self {
        self.per_action.insert(action.into(), cooldown);
        self
    }

    pub fn resend_cooldown(&self) -> Duration {
        self.resend_cooldown
    }

    pub fn cooldown_for(&self, action: &str) -> Duration {
        if let Some(cooldown) = self.per_action.get(action) {
            return *cooldown;
        }
        if self.resend_actions.contains(action) {
            self.resend_cooldown
        } else {
            Duration::zero()
        }
    }
}

impl Default for ActionPolicy {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_RESEND_COOLDOWN_SECS))
    }
}

/// Acción en curso.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction {
    pub ticket: ActionTicket,
    pub action: String,
    pub step_index: usize,
    /// Fingerprint de los valores del step que dispararon la acción.
    pub fingerprint: String,
    pub started_at: DateTime<Utc>,
}

/// Adaptador de acciones de UNA instancia de flujo.
///
/// Invariantes:
/// - A lo sumo una acción pendiente; una nueva invocación mientras hay otra
///   pendiente se rechaza (no se encola).
/// - Tras un `Succeeded`, la misma acción no puede re-invocarse hasta que pase
///   su cooldown. El cooldown sólo bloquea invocaciones nuevas.
#[derive(Debug)]
pub struct AsyncActionAdapter {
    flow_id: Uuid,
    policy: ActionPolicy,
    clock: Arc<dyn Clock>,
    pending: Option<PendingAction>,
    last_success: HashMap<String, DateTime<Utc>>,
    invocations: HashMap<String, u32>,
}

impl AsyncActionAdapter {
    pub fn new(flow_id: Uuid, policy: ActionPolicy, clock: Arc<dyn Clock>) -> Self {
        Self { flow_id,
               policy,
               clock,
               pending: None,
               last_success: HashMap::new(),
               invocations: HashMap::new() }
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Tiempo restante de cooldown para `action`, si lo hay.
    pub fn cooldown_remaining(&self, action: &str) -> Option<Duration> {
        let last = self.last_success.get(action)?;
        let remaining = *last + self.policy.cooldown_for(action) - self.clock.now();
        (remaining > Duration::zero()).then_some(remaining)
    }

    /// Número de invocaciones iniciadas de `action` en esta instancia.
    pub fn invocation_count(&self, action: &str) -> u32 {
        self.invocations.get(action).copied().unwrap_or(0)
    }

    /// Inicia una invocación y devuelve su ticket.
    pub fn begin(&mut self,
                 action: &str,
                 step_index: usize,
                 fingerprint: String)
                 -> Result<ActionTicket, AsyncActionError> {
        if let Some(p) = &self.pending {
            return Err(AsyncActionError::AlreadyPending { action: p.action.clone() });
        }
        if let Some(remaining) = self.cooldown_remaining(action) {
            // redondeo hacia arriba: 0.2s restantes se muestran como 1s
            let ms = remaining.num_milliseconds();
            return Err(AsyncActionError::Cooldown { action: action.to_string(),
                                                    remaining_secs: (ms + 999) / 1000 });
        }
        let ticket = ActionTicket::issue(self.flow_id);
        *self.invocations.entry(action.to_string()).or_insert(0) += 1;
        debug!("action:begin flow_id={} action={action} ticket={}", self.flow_id, ticket.id);
        self.pending = Some(PendingAction { ticket,
                                            action: action.to_string(),
                                            step_index,
                                            fingerprint,
                                            started_at: self.clock.now() });
        Ok(ticket)
    }

    /// Registra el resultado terminal de la acción pendiente.
    ///
    /// Un ticket que no corresponde a la acción pendiente se rechaza. Un
    /// resultado `Pending` deja la acción en curso.
    pub fn complete(&mut self,
                    ticket: ActionTicket,
                    result: &AsyncActionResult)
                    -> Result<Option<PendingAction>, AsyncActionError> {
        match &self.pending {
            Some(p) if p.ticket == ticket => {}
            _ => return Err(AsyncActionError::StaleTicket(ticket)),
        }
        if result.is_pending() {
            return Ok(None);
        }
        let done = self.pending.take();
        if let (Some(p), true) = (&done, result.is_success()) {
            self.last_success.insert(p.action.clone(), self.clock.now());
        }
        Ok(done)
    }

    /// Arranca el cooldown de `action` como si acabara de tener éxito (el
    /// código se envió antes de entrar al flujo).
    pub fn start_cooldown(&mut self, action: &str) {
        self.last_success.insert(action.to_string(), self.clock.now());
    }

    /// Abandona la acción pendiente (retroceso o cancelación). Su resultado,
    /// si llega, será descartado.
    pub fn abandon(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }
}
