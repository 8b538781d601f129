//! Definiciones relacionadas a Steps.
//!
//! Un Step es una pantalla de un wizard: declara los campos que recolecta,
//! sus reglas y, opcionalmente, la acción asíncrona que debe terminar con
//! éxito antes de avanzar (p.ej. "send-otp" antes de "enter code").

pub mod definition;
mod status;

pub use definition::StepDefinition;
pub use status::StepStatus;
