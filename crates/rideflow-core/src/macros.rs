//! Macros de conveniencia.

/// Construye un `FieldValues` a partir de pares `campo => valor`.
///
/// ```
/// let values = rideflow_core::field_values! { "phone" => "12345678901", "password" => "123456" };
/// assert_eq!(values.len(), 2);
/// ```
#[macro_export]
macro_rules! field_values {
    () => {
        $crate::model::FieldValues::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut values = $crate::model::FieldValues::new();
        $( values.insert(($key).to_string(), ($value).to_string()); )+
        values
    }};
}
