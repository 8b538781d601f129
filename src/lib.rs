//! rideflow
//!
//! Librería de la aplicación:
//! - `config`: configuración desde el entorno (.env).
//! - `errors`: errores de nivel aplicación.
//! - `script`: ejecución de flujos guionados contra los servicios simulados.
//!
//! El motor vive en `rideflow-core`, el catálogo de wizards en
//! `rideflow-domain` y los servicios simulados en `rideflow-adapters`.

pub mod config;
pub mod errors;
pub mod script;

pub use config::AppConfig;
pub use errors::AppError;
