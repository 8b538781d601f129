//! Modelos neutrales compartidos (valores de campos, errores por campo).
//!
//! Los valores se guardan tal como los escribe el usuario (`String`); la
//! interpretación (dígitos, montos, emails) es responsabilidad de las reglas
//! de validación.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::hashing::hash_value;

/// Valores acumulados de un flujo: nombre de campo -> valor crudo. Conserva el
/// orden de inserción para que la UI pueda re-renderizarlos en orden.
pub type FieldValues = IndexMap<String, String>;

/// Errores de validación: nombre de campo -> mensaje. Un mensaje por campo.
pub type FieldErrors = IndexMap<String, String>;

/// Fingerprint estable de un subconjunto de campos. Campos ausentes cuentan
/// como cadena vacía, de modo que "no enviado" y "vacío" son equivalentes.
pub fn fingerprint_fields<'a, I>(values: &FieldValues, names: I) -> String
    where I: IntoIterator<Item = &'a str>
{
    let mut map = Map::new();
    for name in names {
        let v = values.get(name).cloned().unwrap_or_default();
        map.insert(name.to_string(), Value::String(v));
    }
    hash_value(&Value::Object(map))
}

/// Representación JSON de todos los valores (para fingerprints y receipts).
pub fn values_to_json(values: &FieldValues) -> Value {
    Value::Object(values.iter()
                        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                        .collect())
}
