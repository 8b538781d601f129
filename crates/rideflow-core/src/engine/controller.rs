//! `FlowController`: máquina de estados de un wizard.
//!
//! Estados: `AtStep(i)` para `i` en `[0, n)` y `Complete`. Todas las
//! transiciones ocurren por acciones discretas del usuario o por la llegada
//! del resultado de la (única) acción pendiente.
//!
//! Las violaciones de invariantes (avanzar desde `Complete`, retroceder desde
//! el step 0, pedir la proyección antes de completar) son errores de
//! programación: las variantes `try_*` las devuelven como `CoreEngineError` y
//! las variantes sin prefijo entran en pánico.

use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::action::{ActionDispatch, ActionTicket, AsyncActionAdapter, AsyncActionError, AsyncActionResult,
                    PendingAction};
use crate::constants::ENGINE_VERSION;
use crate::engine::{CancelledFlow, EngineSettings, ResolveOutcome, StepOutcome};
use crate::errors::{invariant_violation, CoreEngineError};
use crate::event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
use crate::hashing::hash_value;
use crate::model::{values_to_json, FieldValues};
use crate::projection::ReceiptProjection;
use crate::repo::{ActionRecord, FlowDefinition, FlowInstance, FlowPosition};
use crate::step::{StepDefinition, StepStatus};

#[derive(Debug)]
pub struct FlowController<E = InMemoryEventStore>
    where E: EventStore
{
    definition: Arc<FlowDefinition>,
    instance: FlowInstance,
    adapter: AsyncActionAdapter,
    outbox: Option<ActionDispatch>,
    event_store: E,
}

impl FlowController<InMemoryEventStore> {
    /// Crea una instancia nueva con settings por defecto (cooldown de reenvío
    /// 60s, reloj del sistema).
    pub fn new(definition: Arc<FlowDefinition>) -> Self {
        Self::with_settings(definition, &EngineSettings::default())
    }

    pub fn with_settings(definition: Arc<FlowDefinition>, settings: &EngineSettings) -> Self {
        Self::with_store(definition, settings, InMemoryEventStore::default())
    }
}

impl<E: EventStore> FlowController<E> {
    pub fn with_store(definition: Arc<FlowDefinition>, settings: &EngineSettings, mut event_store: E) -> Self {
        let instance = FlowInstance::new();
        let policy = definition.steps()
                               .iter()
                               .flat_map(|s| s.resend_action().into_iter().chain(s.entry_cooldown()))
                               .fold(settings.action_policy.clone(), |policy, action| policy.resends(action));
        let adapter = AsyncActionAdapter::new(instance.id, policy, Arc::clone(&settings.clock));
        event_store.append_kind(instance.id,
                                FlowEventKind::FlowStarted { flow: definition.name().to_string(),
                                                             definition_hash: definition.definition_hash().to_string(),
                                                             step_count: definition.len() });
        info!("flow:start flow={} flow_id={}", definition.name(), instance.id);
        let mut controller = Self { definition,
                                    instance,
                                    adapter,
                                    outbox: None,
                                    event_store };
        controller.enter_step(0);
        controller
    }

    // ------------------------------------------------------------------
    // Lectura
    // ------------------------------------------------------------------

    pub fn flow_id(&self) -> Uuid {
        self.instance.id
    }

    pub fn definition(&self) -> &FlowDefinition {
        &self.definition
    }

    pub fn position(&self) -> FlowPosition {
        self.instance.position
    }

    pub fn current_index(&self) -> Option<usize> {
        self.instance.position.index()
    }

    pub fn is_complete(&self) -> bool {
        self.instance.position == FlowPosition::Complete
    }

    /// Step actual; `None` en `Complete`.
    pub fn current_step(&self) -> Option<&StepDefinition> {
        self.current_index().and_then(|i| self.definition.step(i))
    }

    pub fn field_values(&self) -> &FieldValues {
        &self.instance.values
    }

    pub fn action_log(&self) -> &[ActionRecord] {
        &self.instance.actions
    }

    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.adapter.pending()
    }

    /// Último resultado de acción registrado en el step actual.
    pub fn last_action_result(&self) -> Option<&AsyncActionResult> {
        let index = self.current_index()?;
        self.instance.last_result(index).map(|r| &r.result)
    }

    pub fn cooldown_remaining(&self, action: &str) -> Option<chrono::Duration> {
        self.adapter.cooldown_remaining(action)
    }

    pub fn invocation_count(&self, action: &str) -> u32 {
        self.adapter.invocation_count(action)
    }

    /// Estado de cada step, para indicadores de progreso.
    pub fn step_statuses(&self) -> Vec<StepStatus> {
        let pending_at = self.adapter.pending().map(|p| p.step_index);
        (0..self.definition.len()).map(|i| match self.instance.position {
                                      FlowPosition::Complete => StepStatus::Completed,
                                      FlowPosition::AtStep(c) if i < c => StepStatus::Completed,
                                      FlowPosition::AtStep(c) if i == c && pending_at == Some(c) => {
                                          StepStatus::AwaitingAction
                                      }
                                      FlowPosition::AtStep(c) if i == c => StepStatus::Current,
                                      FlowPosition::AtStep(_) => StepStatus::Pending,
                                  })
                                  .collect()
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    pub fn events(&self) -> Vec<FlowEvent> {
        self.event_store.list(self.instance.id)
    }

    /// Variante compacta de los eventos del flujo.
    pub fn event_variants(&self) -> Vec<&'static str> {
        self.events().iter().map(|e| e.kind.code()).collect()
    }

    // ------------------------------------------------------------------
    // Transiciones
    // ------------------------------------------------------------------

    /// Envía los valores del step actual. Ver `try_submit_step`.
    pub fn submit_step(&mut self, values: &FieldValues) -> StepOutcome {
        self.try_submit_step(values).unwrap_or_else(|e| invariant_violation(e))
    }

    /// Envía los valores del step actual.
    ///
    /// - Sólo se incorporan los campos propios del step.
    /// - Se reportan TODOS los campos inválidos.
    /// - Con una acción pendiente en este step, reenviar los mismos valores
    ///   devuelve el mismo `AwaitingAsync` sin repetir el efecto; valores
    ///   distintos se rechazan sin modificar el estado.
    pub fn try_submit_step(&mut self, values: &FieldValues) -> Result<StepOutcome, CoreEngineError> {
        let index = self.require_step()?;
        let definition = Arc::clone(&self.definition);
        let step = &definition.steps()[index];

        let mut owned = FieldValues::new();
        for (k, v) in values {
            if step.owns(k) {
                owned.insert(k.clone(), v.clone());
            } else {
                debug!("submit:ignore field={k} step={} flow_id={}", step.key(), self.instance.id);
            }
        }

        if let Some(pending) = self.adapter.pending() {
            let mut candidate = self.instance.values.clone();
            candidate.extend(owned);
            if pending.step_index == index && pending.fingerprint == step.fingerprint(&candidate) {
                return Ok(StepOutcome::AwaitingAsync { action: pending.action.clone(),
                                                       ticket: pending.ticket });
            }
            let err = AsyncActionError::AlreadyPending { action: pending.action.clone() };
            self.record_rejection(index, &err);
            return Ok(StepOutcome::ActionRejected(err));
        }

        self.instance.merge(owned);
        self.append(FlowEventKind::StepSubmitted { step_index: index,
                                                   step_key: step.key().to_string() });
        Ok(self.evaluate(index, step))
    }

    /// Re-evalúa el step actual con los valores ya acumulados (p.ej. tras
    /// resolverse la acción que lo condiciona).
    pub fn advance(&mut self) -> StepOutcome {
        self.try_advance().unwrap_or_else(|e| invariant_violation(e))
    }

    pub fn try_advance(&mut self) -> Result<StepOutcome, CoreEngineError> {
        let index = self.require_step()?;
        if let Some(p) = self.adapter.pending() {
            if p.step_index == index {
                return Ok(StepOutcome::AwaitingAsync { action: p.action.clone(),
                                                       ticket: p.ticket });
            }
        }
        let definition = Arc::clone(&self.definition);
        Ok(self.evaluate(index, &definition.steps()[index]))
    }

    /// Vuelve al step anterior y devuelve su índice.
    pub fn retreat(&mut self) -> usize {
        self.try_retreat().unwrap_or_else(|e| invariant_violation(e))
    }

    /// Vuelve al step anterior. Los valores se conservan; los resultados de
    /// acciones del step destino en adelante se invalidan (volver a "enviar
    /// código" invalida el código ya verificado) y una acción en curso se
    /// abandona.
    pub fn try_retreat(&mut self) -> Result<usize, CoreEngineError> {
        let from = match self.instance.position {
            FlowPosition::Complete => return Err(CoreEngineError::FlowCompleted),
            FlowPosition::AtStep(0) => return Err(CoreEngineError::RetreatFromFirstStep),
            FlowPosition::AtStep(i) => i,
        };
        let to = from - 1;
        self.discard_pending();
        self.instance.clear_actions_from(to);
        self.instance.position = FlowPosition::AtStep(to);
        self.append(FlowEventKind::StepRetreated { from, to });
        debug!("flow:retreat flow_id={} from={from} to={to}", self.instance.id);
        Ok(to)
    }

    /// Vuelve a disparar la acción de reenvío del step actual (o su acción
    /// condicionante), sujeto a cooldown y a la regla de una acción en curso.
    pub fn resend(&mut self) -> StepOutcome {
        self.try_resend().unwrap_or_else(|e| invariant_violation(e))
    }

    pub fn try_resend(&mut self) -> Result<StepOutcome, CoreEngineError> {
        let index = self.require_step()?;
        let definition = Arc::clone(&self.definition);
        let step = &definition.steps()[index];
        let Some(action) = step.resend_action().or(step.action()) else {
            return Ok(StepOutcome::ActionRejected(AsyncActionError::NothingToResend));
        };
        if let Some(p) = self.adapter.pending() {
            let err = AsyncActionError::AlreadyPending { action: p.action.clone() };
            self.record_rejection(index, &err);
            return Ok(StepOutcome::ActionRejected(err));
        }
        let fingerprint = step.fingerprint(&self.instance.values);
        Ok(self.start_action(index, action, fingerprint))
    }

    /// Entrega el resultado de una acción.
    ///
    /// Sólo se aplica si `ticket` es la acción pendiente de ESTA instancia;
    /// cualquier otro resultado (tardío, de otra instancia, posterior a un
    /// retroceso) se descarta sin efecto observable.
    pub fn resolve_action(&mut self, ticket: ActionTicket, result: AsyncActionResult) -> ResolveOutcome {
        if ticket.flow_id != self.instance.id {
            warn!("action:discard foreign ticket={ticket} flow_id={}", self.instance.id);
            return ResolveOutcome::Discarded;
        }
        let done = match self.adapter.complete(ticket, &result) {
            Ok(Some(done)) => done,
            Ok(None) => return ResolveOutcome::StillPending,
            Err(e) => {
                warn!("action:discard flow_id={} reason={e}", self.instance.id);
                return ResolveOutcome::Discarded;
            }
        };
        if self.outbox.as_ref().is_some_and(|d| d.ticket == ticket) {
            self.outbox = None;
        }

        if let AsyncActionResult::Succeeded(Value::Object(payload)) = &result {
            if let Some(step) = self.definition.step(done.step_index) {
                for (key, field) in step.capture_map() {
                    if let Some(v) = payload.get(key) {
                        let text = v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
                        self.instance.values.insert(field.clone(), text);
                    }
                }
            }
        }

        match &result {
            AsyncActionResult::Failed(reason) => {
                warn!("action:failed flow_id={} action={} reason={reason}", self.instance.id, done.action)
            }
            _ => info!("action:resolved flow_id={} action={}", self.instance.id, done.action),
        }
        self.append(FlowEventKind::ActionResolved { step_index: done.step_index,
                                                    action: done.action.clone(),
                                                    ticket,
                                                    result: result.clone() });
        self.instance.actions.push(ActionRecord { step_index: done.step_index,
                                                  action: done.action,
                                                  ticket,
                                                  fingerprint: done.fingerprint,
                                                  result: result.clone() });
        ResolveOutcome::Applied(result)
    }

    /// Entrega (una sola vez) la acción recién iniciada para que el host
    /// ejecute el efecto secundario.
    pub fn take_dispatch(&mut self) -> Option<ActionDispatch> {
        self.outbox.take()
    }

    /// Proyección terminal; sólo válida en `Complete`.
    pub fn projection(&self) -> ReceiptProjection {
        self.try_projection().unwrap_or_else(|e| invariant_violation(e))
    }

    pub fn try_projection(&self) -> Result<ReceiptProjection, CoreEngineError> {
        if !self.is_complete() {
            return Err(CoreEngineError::NotCompleted);
        }
        Ok(self.definition.project(&self.instance.values))
    }

    /// Descarta la instancia completa. Segura en cualquier estado, incluso con
    /// una acción en curso: su resultado ya no tiene dónde aplicarse.
    pub fn cancel(mut self) -> CancelledFlow {
        let discarded = self.discard_pending();
        let step_index = self.current_index();
        self.append(FlowEventKind::FlowCancelled { step_index });
        info!("flow:cancel flow={} flow_id={}", self.definition.name(), self.instance.id);
        CancelledFlow { flow_id: self.instance.id,
                        flow: self.definition.name().to_string(),
                        position: self.instance.position,
                        discarded,
                        events: self.events() }
    }

    // ------------------------------------------------------------------
    // Internos
    // ------------------------------------------------------------------

    fn require_step(&self) -> Result<usize, CoreEngineError> {
        self.current_index().ok_or(CoreEngineError::FlowCompleted)
    }

    fn append(&mut self, kind: FlowEventKind) {
        self.event_store.append_kind(self.instance.id, kind);
    }

    fn evaluate(&mut self, index: usize, step: &StepDefinition) -> StepOutcome {
        let errors = step.validate(&self.instance.values);
        if !errors.is_empty() {
            debug!("submit:invalid flow_id={} step={} fields={:?}",
                   self.instance.id,
                   step.key(),
                   errors.keys().collect::<Vec<_>>());
            self.append(FlowEventKind::ValidationFailed { step_index: index,
                                                          step_key: step.key().to_string(),
                                                          fields: errors.keys().cloned().collect() });
            return StepOutcome::Invalid(errors);
        }
        if let Some(action) = step.action() {
            let fingerprint = step.fingerprint(&self.instance.values);
            if !self.instance.has_success(index, action, &fingerprint) {
                return self.start_action(index, action, fingerprint);
            }
        }
        self.move_forward(index)
    }

    fn start_action(&mut self, index: usize, action: &str, fingerprint: String) -> StepOutcome {
        match self.adapter.begin(action, index, fingerprint) {
            Ok(ticket) => {
                self.outbox = Some(ActionDispatch { ticket,
                                                    action: action.to_string(),
                                                    payload: self.instance.values.clone() });
                self.append(FlowEventKind::ActionRequested { step_index: index,
                                                             action: action.to_string(),
                                                             ticket });
                info!("action:requested flow_id={} action={action}", self.instance.id);
                StepOutcome::AwaitingAsync { action: action.to_string(),
                                             ticket }
            }
            Err(err) => {
                self.record_rejection(index, &err);
                StepOutcome::ActionRejected(err)
            }
        }
    }

    fn record_rejection(&mut self, index: usize, err: &AsyncActionError) {
        let action = match err {
            AsyncActionError::Cooldown { action, .. } | AsyncActionError::AlreadyPending { action } => action.clone(),
            _ => String::new(),
        };
        warn!("action:rejected flow_id={} action={action} reason={}", self.instance.id, err.reason());
        self.append(FlowEventKind::ActionRejected { step_index: index,
                                                    action,
                                                    reason: err.reason().to_string() });
    }

    fn move_forward(&mut self, index: usize) -> StepOutcome {
        let next = index + 1;
        let to = if next == self.definition.len() {
            FlowPosition::Complete
        } else {
            FlowPosition::AtStep(next)
        };
        self.instance.position = to;
        self.append(FlowEventKind::StepAdvanced { from: index, to: next });
        if to == FlowPosition::AtStep(next) {
            self.enter_step(next);
        }
        if to == FlowPosition::Complete {
            let values_fingerprint = hash_value(&json!({
                "engine_version": ENGINE_VERSION,
                "definition_hash": self.definition.definition_hash(),
                "values": values_to_json(&self.instance.values),
            }));
            self.append(FlowEventKind::FlowCompleted { values_fingerprint });
            info!("flow:complete flow={} flow_id={}", self.definition.name(), self.instance.id);
        }
        StepOutcome::Advanced { from: index, to }
    }

    /// Al entrar avanzando a un step cuyo código ya fue enviado, su
    /// reenvío arranca en cooldown.
    fn enter_step(&mut self, index: usize) {
        let Some(action) = self.definition.step(index).and_then(StepDefinition::entry_cooldown) else {
            return;
        };
        self.adapter.start_cooldown(action);
        debug!("action:cooldown flow_id={} action={action} step={index}", self.instance.id);
    }

    fn discard_pending(&mut self) -> Option<ActionTicket> {
        let pending = self.adapter.abandon()?;
        self.outbox = None;
        self.append(FlowEventKind::ActionDiscarded { ticket: pending.ticket });
        debug!("action:abandon flow_id={} action={}", self.instance.id, pending.action);
        Some(pending.ticket)
    }
}
