//! rideflow-core: motor de wizards con validación local, acciones asíncronas
//! que condicionan el avance y una proyección terminal.
#[macro_use]
pub mod macros;

pub mod action;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod projection;
pub mod repo;
pub mod step;
pub mod validation;

pub use action::{ActionPolicy, ActionService, ActionTicket, AsyncActionError, AsyncActionResult, Clock, ManualClock,
                 SystemClock};
pub use engine::{ActionCompletion, CancelledFlow, Delivery, EngineSettings, FlowBuilder, FlowController,
                 FlowSession, ResolveOutcome, StepOutcome};
pub use errors::CoreEngineError;
pub use event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
pub use model::{FieldErrors, FieldValues};
pub use projection::{reference_for, ReceiptLine, ReceiptProjection, ReceiptProjector, SummaryProjector};
pub use repo::{build_flow_definition, FlowDefinition, FlowPosition};
pub use step::{StepDefinition, StepStatus};
pub use validation::{Condition, FieldSpec, Rule, RuleKind, Validity};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn login() -> Arc<FlowDefinition> {
        Arc::new(FlowDefinition::builder("login").step(StepDefinition::new("credentials").field(FieldSpec::new("phone").required()
                                                                                                                    .exact_digits(11))
                                                                                          .field(FieldSpec::new("password").required()
                                                                                                                           .exact_digits(6)))
                                                 .project_with(SummaryProjector::new("Welcome back").line("Phone", "phone"))
                                                 .build()
                                                 .expect("login definition"))
    }

    #[test]
    fn single_step_flow_completes_and_projects() {
        let mut c = FlowController::new(login());
        let outcome = c.submit_step(&field_values! { "phone" => "08012345678", "password" => "123456" });
        assert_eq!(outcome, StepOutcome::Advanced { from: 0,
                                                    to: FlowPosition::Complete });
        let receipt = c.projection();
        assert_eq!(receipt.title, "Welcome back");
        assert_eq!(receipt.value_of("Phone"), Some("08012345678"));
        assert_eq!(c.event_variants(), vec!["I", "S", "F", "C"]);
    }

    #[test]
    fn try_variants_report_invariant_violations() {
        let mut c = FlowController::new(login());
        assert_eq!(c.try_retreat(), Err(CoreEngineError::RetreatFromFirstStep));
        assert_eq!(c.try_projection(), Err(CoreEngineError::NotCompleted));
        c.submit_step(&field_values! { "phone" => "08012345678", "password" => "123456" });
        assert_eq!(c.try_advance(), Err(CoreEngineError::FlowCompleted));
        assert_eq!(c.try_submit_step(&FieldValues::new()), Err(CoreEngineError::FlowCompleted));
        assert_eq!(c.try_retreat(), Err(CoreEngineError::FlowCompleted));
    }

    #[test]
    #[should_panic(expected = "invariant violation")]
    fn retreat_from_first_step_panics() {
        let mut c = FlowController::new(login());
        c.retreat();
    }

    #[test]
    #[should_panic(expected = "flow already completed")]
    fn advance_after_complete_panics() {
        let mut c = FlowController::new(login());
        c.submit_step(&field_values! { "phone" => "08012345678", "password" => "123456" });
        c.advance();
    }
}
