//! Motor de wizards: builder de definiciones, controlador (máquina de
//! estados) y sesión asíncrona.

pub mod builder;
pub mod controller;
pub mod outcome;
pub mod session;
pub mod settings;

pub use builder::FlowBuilder;
pub use controller::FlowController;
pub use outcome::{CancelledFlow, ResolveOutcome, StepOutcome};
pub use session::{ActionCompletion, Delivery, FlowSession};
pub use settings::EngineSettings;

pub use crate::event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
pub use crate::repo::{FlowDefinition, FlowPosition};
