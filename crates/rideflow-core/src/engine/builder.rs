//! Builder para `FlowDefinition`.
//!
//! ```ignore
//! let definition = FlowDefinition::builder("two-factor-setup")
//!     .step(StepDefinition::new("phone").field(phone).requires_action("send-otp"))
//!     .step(StepDefinition::new("code").field(code).requires_action("verify-code"))
//!     .project_with(SummaryProjector::new("2FA Enabled"))
//!     .build()?;
//! ```

use std::sync::Arc;

use crate::errors::CoreEngineError;
use crate::projection::ReceiptProjector;
use crate::repo::{build_flow_definition, FlowDefinition};
use crate::step::StepDefinition;

#[derive(Debug)]
pub struct FlowBuilder {
    name: String,
    steps: Vec<StepDefinition>,
    projector: Option<Arc<dyn ReceiptProjector>>,
}

impl FlowBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               steps: Vec::new(),
               projector: None }
    }

    #[inline]
    pub fn step(mut self, step: StepDefinition) -> Self {
        self.steps.push(step);
        self
    }

    #[inline]
    pub fn project_with<P>(mut self, projector: P) -> Self
        where P: ReceiptProjector + 'static
    {
        self.projector = Some(Arc::new(projector));
        self
    }

    /// Consume el builder y valida la definición.
    pub fn build(self) -> Result<FlowDefinition, CoreEngineError> {
        let projector = self.projector.ok_or(CoreEngineError::MissingProjector)?;
        build_flow_definition(self.name, self.steps, projector)
    }
}
