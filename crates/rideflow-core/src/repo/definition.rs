//! `FlowDefinition`: secuencia ordenada e inmutable de steps + proyector.
//!
//! Los flujos equivalentes (enviar código / ingresar código / éxito) se
//! expresan como datos; no hay lógica de ramificación por pantalla.
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::json;

use crate::errors::CoreEngineError;
use crate::hashing::hash_value;
use crate::model::FieldValues;
use crate::projection::{ReceiptProjection, ReceiptProjector};
use crate::step::StepDefinition;

pub struct FlowDefinition {
    name: String,
    steps: Vec<StepDefinition>,
    projector: Arc<dyn ReceiptProjector>,
    definition_hash: String,
}

impl FlowDefinition {
    pub fn builder(name: impl Into<String>) -> crate::engine::FlowBuilder {
        crate::engine::FlowBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    pub fn step_index(&self, key: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.key() == key)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }

    /// Proyección terminal para los valores dados.
    pub fn project(&self, values: &FieldValues) -> ReceiptProjection {
        self.projector.project(&self.name, values)
    }
}

impl fmt::Debug for FlowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowDefinition")
         .field("name", &self.name)
         .field("steps", &self.steps.iter().map(StepDefinition::key).collect::<Vec<_>>())
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}

/// Valida y construye una definición.
///
/// Rechaza: cero steps, claves de step duplicadas y campos declarados por más
/// de un step (cada campo tiene un único dueño).
pub fn build_flow_definition(name: impl Into<String>,
                             steps: Vec<StepDefinition>,
                             projector: Arc<dyn ReceiptProjector>)
                             -> Result<FlowDefinition, CoreEngineError> {
    let name = name.into();
    if steps.is_empty() {
        return Err(CoreEngineError::EmptyDefinition);
    }
    let mut keys = HashSet::new();
    let mut fields = HashSet::new();
    for step in &steps {
        if !keys.insert(step.key()) {
            return Err(CoreEngineError::DuplicateStep(step.key().to_string()));
        }
        for field in step.field_names() {
            if !fields.insert(field) {
                return Err(CoreEngineError::DuplicateField(field.to_string()));
            }
        }
    }
    let definition_hash = hash_value(&json!({
        "flow": name,
        "steps": steps.iter().map(StepDefinition::describe).collect::<Vec<_>>(),
    }));
    Ok(FlowDefinition { name,
                        steps,
                        projector,
                        definition_hash })
}
