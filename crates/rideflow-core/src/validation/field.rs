//! Especificación de un campo: nombre, reglas ordenadas y condición opcional.

use regex::Regex;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use super::rule::{Rule, RuleKind};
use crate::model::FieldValues;

/// Condición de activación: el campo sólo se valida cuando `field == equals`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: String,
    pub equals: String,
}

impl Condition {
    pub fn holds(&self, values: &FieldValues) -> bool {
        values.get(&self.field).map(String::as_str) == Some(self.equals.as_str())
    }
}

/// Declaración de un campo recolectado por un step.
///
/// Las reglas se evalúan en orden; la primera que falla define el único
/// mensaje de error del campo.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    label: String,
    rules: Vec<Rule>,
    condition: Option<Condition>,
    optional: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { label: name.clone(),
               name,
               rules: Vec::new(),
               condition: None,
               optional: false }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn rule(mut self, kind: RuleKind) -> Self {
        self.rules.push(Rule::new(kind));
        self
    }

    /// Sobrescribe el mensaje de la última regla añadida.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.rules.pop() {
            self.rules.push(last.with_message(message));
        }
        self
    }

    pub fn required(self) -> Self {
        self.rule(RuleKind::Required)
    }

    pub fn exact_digits(self, n: usize) -> Self {
        self.rule(RuleKind::ExactDigits(n))
    }

    pub fn email(self) -> Self {
        self.rule(RuleKind::Email)
    }

    pub fn pattern(self, re: Regex) -> Self {
        self.rule(RuleKind::Pattern(re))
    }

    pub fn range(self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.rule(RuleKind::NumericRange { min, max })
    }

    pub fn positive_amount(self) -> Self {
        self.rule(RuleKind::PositiveAmount)
    }

    pub fn equals_field(self, other: impl Into<String>) -> Self {
        self.rule(RuleKind::EqualsField(other.into()))
    }

    pub fn one_of<I, S>(self, options: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.rule(RuleKind::OneOf(options.into_iter().map(Into::into).collect()))
    }

    pub fn max_length(self, n: usize) -> Self {
        self.rule(RuleKind::MaxLength(n))
    }

    /// Sólo valida el campo cuando `field` tiene el valor `equals`.
    pub fn when(mut self, field: impl Into<String>, equals: impl Into<String>) -> Self {
        self.condition = Some(Condition { field: field.into(),
                                          equals: equals.into() });
        self
    }

    /// Un campo opcional vacío no se valida.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// ¿Aplica la validación con estos valores?
    pub fn is_active(&self, values: &FieldValues) -> bool {
        self.condition.as_ref().map_or(true, |c| c.holds(values))
    }

    pub(crate) fn describe(&self) -> Value {
        json!({
            "name": self.name,
            "rules": self.rules.iter().map(|r| r.kind.describe()).collect::<Vec<_>>(),
            "condition": self.condition.as_ref().map(|c| json!([c.field, c.equals])),
            "optional": self.optional,
        })
    }
}
