//! `FlowSession`: host asíncrono de un `FlowController`.
//!
//! Ejecuta cada acción iniciada por el controlador en una tarea tokio contra
//! un `ActionService` y devuelve la respuesta por un canal mpsc. El canal
//! pertenece a la sesión: al cancelarla (o soltarla) el receptor se cierra y
//! cualquier respuesta tardía se descarta en el envío.

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::action::{ActionService, ActionTicket, AsyncActionError, AsyncActionResult};
use crate::engine::{CancelledFlow, FlowController, ResolveOutcome, StepOutcome};
use crate::event::{EventStore, InMemoryEventStore};
use crate::model::FieldValues;

/// Respuesta de un servicio, etiquetada con su ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCompletion {
    pub ticket: ActionTicket,
    pub result: AsyncActionResult,
}

/// Destino de una respuesta enviada por la tarea de la acción.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// La sesión seguía viva y recibió la respuesta.
    Delivered,
    /// La sesión ya no existía; la respuesta se perdió sin efecto.
    Discarded,
}

pub struct FlowSession<E = InMemoryEventStore>
    where E: EventStore
{
    controller: FlowController<E>,
    service: Arc<dyn ActionService>,
    tx: mpsc::UnboundedSender<ActionCompletion>,
    rx: mpsc::UnboundedReceiver<ActionCompletion>,
    in_flight: Option<JoinHandle<Delivery>>,
}

impl<E: EventStore> FlowSession<E> {
    pub fn new(controller: FlowController<E>, service: Arc<dyn ActionService>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { controller,
               service,
               tx,
               rx,
               in_flight: None }
    }

    pub fn controller(&self) -> &FlowController<E> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FlowController<E> {
        &mut self.controller
    }

    /// Handle de la última tarea de acción lanzada (si no se tomó antes).
    pub fn take_in_flight(&mut self) -> Option<JoinHandle<Delivery>> {
        self.in_flight.take()
    }

    /// `submit_step` + despacho de la acción que haya iniciado.
    pub fn submit(&mut self, values: &FieldValues) -> StepOutcome {
        let outcome = self.controller.submit_step(values);
        self.dispatch();
        outcome
    }

    pub fn advance(&mut self) -> StepOutcome {
        let outcome = self.controller.advance();
        self.dispatch();
        outcome
    }

    pub fn resend(&mut self) -> StepOutcome {
        let outcome = self.controller.resend();
        self.dispatch();
        outcome
    }

    pub fn retreat(&mut self) -> usize {
        self.controller.retreat()
    }

    /// Espera la próxima respuesta aplicable a la acción pendiente.
    ///
    /// Devuelve `None` si no hay acción pendiente. Las respuestas descartadas
    /// (tickets viejos tras un retroceso) se saltan.
    pub async fn next_resolution(&mut self) -> Option<ResolveOutcome> {
        loop {
            self.controller.pending_action()?;
            let completion = self.rx.recv().await?;
            match self.controller.resolve_action(completion.ticket, completion.result) {
                ResolveOutcome::Discarded => continue,
                outcome => return Some(outcome),
            }
        }
    }

    /// Envía el step y, si queda esperando una acción, espera su respuesta.
    ///
    /// Éxito: re-evalúa el step y avanza. Fallo: `ActionRejected(Failed)` y el
    /// flujo queda en el mismo step.
    pub async fn submit_and_wait(&mut self, values: &FieldValues) -> StepOutcome {
        let outcome = self.submit(values);
        self.wait_on(outcome).await
    }

    /// Igual que `submit_and_wait` para el botón de reenvío.
    pub async fn resend_and_wait(&mut self) -> StepOutcome {
        let outcome = self.resend();
        self.wait_on(outcome).await
    }

    /// Cancela el flujo. Las tareas en curso terminan pero su respuesta se
    /// descarta.
    pub fn cancel(self) -> CancelledFlow {
        let FlowSession { controller, rx, .. } = self;
        drop(rx);
        controller.cancel()
    }

    async fn wait_on(&mut self, outcome: StepOutcome) -> StepOutcome {
        let action = match &outcome {
            StepOutcome::AwaitingAsync { action, .. } => action.clone(),
            _ => return outcome,
        };
        loop {
            match self.next_resolution().await {
                Some(ResolveOutcome::StillPending) => continue,
                Some(ResolveOutcome::Applied(AsyncActionResult::Failed(reason))) => {
                    return StepOutcome::ActionRejected(AsyncActionError::Failed { action, reason })
                }
                Some(_) | None => return self.advance(),
            }
        }
    }

    fn dispatch(&mut self) {
        let Some(dispatch) = self.controller.take_dispatch() else {
            return;
        };
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        debug!("session:dispatch action={} ticket={}", dispatch.action, dispatch.ticket);
        self.in_flight = Some(tokio::spawn(async move {
                                  let result = service.invoke(&dispatch.action, &dispatch.payload).await;
                                  let completion = ActionCompletion { ticket: dispatch.ticket,
                                                                      result };
                                  match tx.send(completion) {
                                      Ok(()) => Delivery::Delivered,
                                      Err(_) => {
                                          info!("session:late-result action={} discarded", dispatch.action);
                                          Delivery::Discarded
                                      }
                                  }
                              }));
    }
}

impl<E: EventStore> std::fmt::Debug for FlowSession<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowSession")
         .field("flow_id", &self.controller.flow_id())
         .field("position", &self.controller.position())
         .field("in_flight", &self.in_flight.is_some())
         .finish()
    }
}
