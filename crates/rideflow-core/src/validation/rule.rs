//! Reglas de validación de un solo campo.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::model::FieldValues;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Resultado de validar un valor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid(String),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }
}

/// Tipos de regla soportados.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Texto no vacío (tras `trim`).
    Required,
    /// Exactamente `n` dígitos ASCII.
    ExactDigits(usize),
    Email,
    Pattern(Regex),
    /// Número decimal dentro de cotas inclusivas opcionales.
    NumericRange { min: Option<Decimal>, max: Option<Decimal> },
    /// Número decimal estrictamente mayor que cero.
    PositiveAmount,
    /// Igual al valor de otro campo (confirmar PIN / contraseña).
    EqualsField(String),
    OneOf(Vec<String>),
    MaxLength(usize),
}

impl RuleKind {
    /// Mensaje por defecto asociado a la regla.
    pub fn default_message(&self) -> String {
        match self {
            RuleKind::Required => "is required".to_string(),
            RuleKind::ExactDigits(n) => format!("must be {n} digits"),
            RuleKind::Email => "must be a valid email address".to_string(),
            RuleKind::Pattern(_) => "has an invalid format".to_string(),
            RuleKind::NumericRange { min: Some(min), max: Some(max) } => format!("must be between {min} and {max}"),
            RuleKind::NumericRange { min: Some(min), max: None } => format!("must be at least {min}"),
            RuleKind::NumericRange { min: None, max: Some(max) } => format!("must be at most {max}"),
            RuleKind::NumericRange { min: None, max: None } => "must be a number".to_string(),
            RuleKind::PositiveAmount => "must be a positive amount".to_string(),
            RuleKind::EqualsField(other) => format!("must match {other}"),
            RuleKind::OneOf(options) => format!("must be one of: {}", options.join(", ")),
            RuleKind::MaxLength(n) => format!("must be at most {n} characters"),
        }
    }

    /// Evalúa la regla. `values` aporta el contexto para reglas entre campos.
    pub fn check(&self, value: &str, values: &FieldValues) -> bool {
        match self {
            RuleKind::Required => !value.trim().is_empty(),
            RuleKind::ExactDigits(n) => value.len() == *n && value.bytes().all(|b| b.is_ascii_digit()),
            RuleKind::Email => EMAIL_RE.is_match(value.trim()),
            RuleKind::Pattern(re) => re.is_match(value),
            RuleKind::NumericRange { min, max } => match Decimal::from_str(value.trim()) {
                Ok(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
                Err(_) => false,
            },
            RuleKind::PositiveAmount => Decimal::from_str(value.trim()).map(|n| n > Decimal::ZERO).unwrap_or(false),
            RuleKind::EqualsField(other) => values.get(other).map(String::as_str).unwrap_or("") == value,
            RuleKind::OneOf(options) => options.iter().any(|o| o == value),
            RuleKind::MaxLength(n) => value.chars().count() <= *n,
        }
    }

    /// Descripción estable usada en el hash de la definición.
    pub(crate) fn describe(&self) -> String {
        match self {
            RuleKind::Pattern(re) => format!("Pattern({})", re.as_str()),
            other => format!("{other:?}"),
        }
    }
}

/// Regla = predicado + mensaje de error.
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: RuleKind,
    pub message: String,
}

impl Rule {
    pub fn new(kind: RuleKind) -> Self {
        let message = kind.default_message();
        Self { kind, message }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Valida `value` contra esta regla.
    pub fn evaluate(&self, value: &str, values: &FieldValues) -> Validity {
        if self.kind.check(value, values) {
            Validity::Valid
        } else {
            Validity::Invalid(self.message.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_values;

    #[test]
    fn exact_digits_rejects_letters_and_wrong_length() {
        let ctx = FieldValues::new();
        let rule = RuleKind::ExactDigits(4);
        assert!(rule.check("1234", &ctx));
        assert!(!rule.check("12a4", &ctx));
        assert!(!rule.check("123", &ctx));
        assert!(!rule.check("12345", &ctx));
        assert!(!rule.check("", &ctx));
        assert_eq!(rule.default_message(), "must be 4 digits");
    }

    #[test]
    fn required_trims_whitespace() {
        let ctx = FieldValues::new();
        assert!(!RuleKind::Required.check("   ", &ctx));
        assert!(RuleKind::Required.check(" a ", &ctx));
    }

    #[test]
    fn email_shape() {
        let ctx = FieldValues::new();
        assert!(RuleKind::Email.check("rider@example.com", &ctx));
        assert!(!RuleKind::Email.check("rider@example", &ctx));
        assert!(!RuleKind::Email.check("rider example@x.com", &ctx));
    }

    #[test]
    fn numeric_range_and_positive_amount() {
        let ctx = FieldValues::new();
        let range = RuleKind::NumericRange { min: Some(Decimal::ONE), max: Some(Decimal::from(18)) };
        assert!(range.check("1", &ctx));
        assert!(range.check("18", &ctx));
        assert!(!range.check("19", &ctx));
        assert!(!range.check("seats", &ctx));
        assert!(RuleKind::PositiveAmount.check("2500.50", &ctx));
        assert!(!RuleKind::PositiveAmount.check("0", &ctx));
        assert!(!RuleKind::PositiveAmount.check("-3", &ctx));
    }

    #[test]
    fn equals_field_reads_context() {
        let ctx = field_values! { "pin" => "1234" };
        let rule = Rule::new(RuleKind::EqualsField("pin".into())).with_message("PINs do not match");
        assert_eq!(rule.evaluate("1234", &ctx), Validity::Valid);
        assert_eq!(rule.evaluate("4321", &ctx), Validity::Invalid("PINs do not match".into()));
    }

    #[test]
    fn one_of_is_exact() {
        let ctx = FieldValues::new();
        let rule = RuleKind::OneOf(vec!["self".into(), "group".into(), "drop".into()]);
        assert!(rule.check("drop", &ctx));
        assert!(!rule.check("Drop", &ctx));
    }
}
