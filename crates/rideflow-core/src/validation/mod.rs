//! Validación de campos.
//!
//! Funciones puras que deciden si un valor crudo cumple una regla. Cubre los
//! tipos de regla usados en las pantallas: códigos numéricos de longitud fija
//! (PIN de 4, contraseña/OTP de 6, teléfono de 11), texto no vacío, forma de
//! email, igualdad entre campos (confirmaciones) y requisitos condicionales.

pub mod field;
pub mod rule;
mod validator;

pub use field::{Condition, FieldSpec};
pub use rule::{Rule, RuleKind, Validity};
pub use validator::{validate_field, validate_fields};
