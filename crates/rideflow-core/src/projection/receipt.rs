//! `ReceiptProjection`: snapshot de sólo lectura para la pantalla final.
//!
//! Los proyectores son funciones puras de los valores acumulados: los mismos
//! valores producen siempre la misma proyección (incluida la referencia), lo
//! que permite tests tipo snapshot de cada pantalla terminal.
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::hashing::hash_value;
use crate::model::{values_to_json, FieldValues};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptProjection {
    pub flow: String,
    pub title: String,
    pub reference: Option<String>,
    pub lines: Vec<ReceiptLine>,
    pub total: Option<String>,
}

impl ReceiptProjection {
    pub fn new(flow: impl Into<String>, title: impl Into<String>) -> Self {
        Self { flow: flow.into(),
               title: title.into(),
               reference: None,
               lines: Vec::new(),
               total: None }
    }

    pub fn line(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.lines.push(ReceiptLine { label: label.into(),
                                      value: value.into() });
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_total(mut self, total: impl Into<String>) -> Self {
        self.total = Some(total.into());
        self
    }

    /// Valor de la primera línea con esa etiqueta.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.lines.iter().find(|l| l.label == label).map(|l| l.value.as_str())
    }
}

/// Construye la proyección terminal de un flujo.
pub trait ReceiptProjector: Send + Sync + Debug {
    fn project(&self, flow: &str, values: &FieldValues) -> ReceiptProjection;
}

/// Referencia determinista: `prefix` + 6 dígitos derivados del hash de los
/// valores.
pub fn reference_for(prefix: &str, values: &FieldValues) -> String {
    let digest = hash_value(&values_to_json(values));
    let n = u64::from_str_radix(&digest[..12], 16).unwrap_or(0) % 1_000_000;
    format!("{prefix}{n:06}")
}

/// Proyector genérico: título + líneas `(etiqueta, campo)`. Los campos vacíos
/// o ausentes se omiten.
#[derive(Debug, Clone)]
pub struct SummaryProjector {
    title: String,
    lines: Vec<(String, String)>,
    reference_prefix: Option<String>,
}

impl SummaryProjector {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(),
               lines: Vec::new(),
               reference_prefix: None }
    }

    pub fn line(mut self, label: impl Into<String>, field: impl Into<String>) -> Self {
        self.lines.push((label.into(), field.into()));
        self
    }

    pub fn with_reference(mut self, prefix: impl Into<String>) -> Self {
        self.reference_prefix = Some(prefix.into());
        self
    }
}

impl ReceiptProjector for SummaryProjector {
    fn project(&self, flow: &str, values: &FieldValues) -> ReceiptProjection {
        let mut receipt = ReceiptProjection::new(flow, &self.title);
        for (label, field) in &self.lines {
            match values.get(field) {
                Some(v) if !v.trim().is_empty() => receipt = receipt.line(label, v),
                _ => {}
            }
        }
        if let Some(prefix) = &self.reference_prefix {
            receipt = receipt.with_reference(reference_for(prefix, values));
        }
        receipt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_values;

    #[test]
    fn summary_projector_is_deterministic_and_skips_empty() {
        let p = SummaryProjector::new("Courier Scheduled").line("Sender", "sender")
                                                          .line("Note", "note")
                                                          .with_reference("CR-");
        let values = field_values! { "sender" => "Ada", "note" => "" };
        let a = p.project("schedule-courier", &values);
        let b = p.project("schedule-courier", &values);
        assert_eq!(a, b);
        assert_eq!(a.lines.len(), 1);
        assert_eq!(a.value_of("Sender"), Some("Ada"));
        let reference = a.reference.expect("reference");
        assert!(reference.starts_with("CR-"));
        assert_eq!(reference.len(), 3 + 6);
    }

    #[test]
    fn reference_changes_with_values() {
        let a = reference_for("TRX", &field_values! { "amount" => "100" });
        let b = reference_for("TRX", &field_values! { "amount" => "200" });
        assert_ne!(a, b);
    }
}
