//! Constantes del motor de flujos.
//!
//! `ENGINE_VERSION` participa en el fingerprint de valores que se registra al
//! completar un flujo; cambiarla invalida comparaciones entre versiones.

/// Versión lógica del motor. Se incluye en `FlowCompleted::values_fingerprint`.
pub const ENGINE_VERSION: &str = "W1.0";

/// Ventana de espera por defecto (segundos) antes de poder re-invocar una
/// acción que terminó con éxito (temporizador de "reenviar código").
pub const DEFAULT_RESEND_COOLDOWN_SECS: i64 = 60;
