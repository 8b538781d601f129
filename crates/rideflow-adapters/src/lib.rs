//! rideflow-adapters: servicios externos simulados (SMS/OTP, directorio
//! bancario, pasarela de pagos, backend de cuentas) detrás del contrato
//! `ActionService` del core.
//!
//! Reemplazan a los backends reales con respuestas deterministas y una
//! latencia configurable.

pub mod config;
pub mod services;

pub use config::MockServiceConfig;
pub use services::MockServices;
