use super::{FieldSpec, Validity};
use crate::model::{FieldErrors, FieldValues};

/// Valida un campo con el valor crudo dado y el contexto acumulado.
pub fn validate_field(spec: &FieldSpec, value: &str, values: &FieldValues) -> Validity {
    if !spec.is_active(values) {
        return Validity::Valid;
    }
    if spec.is_optional() && value.trim().is_empty() {
        return Validity::Valid;
    }
    spec.rules()
        .iter()
        .map(|rule| rule.evaluate(value, values))
        .find(|v| !v.is_valid())
        .unwrap_or(Validity::Valid)
}

/// Valida todos los campos y devuelve TODOS los inválidos (nunca sólo el
/// primero). Orden de salida = orden de declaración.
pub fn validate_fields(specs: &[FieldSpec], values: &FieldValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for spec in specs {
        let value = values.get(spec.name()).map(String::as_str).unwrap_or("");
        if let Validity::Invalid(message) = validate_field(spec, value, values) {
            errors.insert(spec.name().to_string(), message);
        }
    }
    errors
}
