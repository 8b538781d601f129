use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::model::{fingerprint_fields, FieldErrors, FieldValues};
use crate::validation::{validate_fields, FieldSpec};

/// Descripción estática de un step. Inmutable una vez incluida en un
/// `FlowDefinition`.
#[derive(Debug, Clone)]
pub struct StepDefinition {
    key: String,
    title: String,
    fields: Vec<FieldSpec>,
    action: Option<String>,
    resend_action: Option<String>,
    entry_cooldown: Option<String>,
    captures: IndexMap<String, String>,
}

impl StepDefinition {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self { title: key.clone(),
               key,
               fields: Vec::new(),
               action: None,
               resend_action: None,
               entry_cooldown: None,
               captures: IndexMap::new() }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Avanzar exige que `action` termine con `Succeeded` para los valores
    /// actuales del step.
    pub fn requires_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Acción que el botón "reenviar" vuelve a disparar desde este step.
    pub fn resends(mut self, action: impl Into<String>) -> Self {
        self.resend_action = Some(action.into());
        self
    }

    /// El código se envió antes de llegar al step: al entrar, `action`
    /// arranca en cooldown y el reenvío no está disponible todavía.
    pub fn cooldown_on_entry(mut self, action: impl Into<String>) -> Self {
        self.entry_cooldown = Some(action.into());
        self
    }

    /// Copia `payload[key]` del resultado exitoso de la acción al campo
    /// `field` de los valores acumulados.
    pub fn captures(mut self, key: impl Into<String>, field: impl Into<String>) -> Self {
        self.captures.insert(key.into(), field.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSpec::name)
    }

    pub fn owns(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.name() == field)
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn resend_action(&self) -> Option<&str> {
        self.resend_action.as_deref()
    }

    pub fn entry_cooldown(&self) -> Option<&str> {
        self.entry_cooldown.as_deref()
    }

    pub fn capture_map(&self) -> &IndexMap<String, String> {
        &self.captures
    }

    /// Valida los campos propios del step contra los valores acumulados.
    pub fn validate(&self, values: &FieldValues) -> FieldErrors {
        validate_fields(&self.fields, values)
    }

    /// Fingerprint de los valores propios del step.
    pub fn fingerprint(&self, values: &FieldValues) -> String {
        fingerprint_fields(values, self.field_names())
    }

    pub(crate) fn describe(&self) -> Value {
        json!({
            "key": self.key,
            "fields": self.fields.iter().map(FieldSpec::describe).collect::<Vec<_>>(),
            "action": self.action,
            "resend": self.resend_action,
            "entry_cooldown": self.entry_cooldown,
        })
    }
}
