use std::time::Duration;

/// Parámetros de los servicios simulados.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockServiceConfig {
    /// Latencia artificial de cada llamada.
    pub latency: Duration,
    /// Cuenta para la que el directorio bancario no devuelve bancos.
    pub failing_account: String,
    pub current_pin: String,
    /// Único código OTP aceptado por `verify-code`.
    pub accepted_code: String,
    pub max_pin_attempts: u32,
    pub pin_lockout: Duration,
}

impl Default for MockServiceConfig {
    fn default() -> Self {
        Self { latency: Duration::from_millis(900),
               failing_account: "0000000000".to_string(),
               current_pin: "1234".to_string(),
               accepted_code: "123456".to_string(),
               max_pin_attempts: 3,
               pin_lockout: Duration::from_secs(60) }
    }
}

impl MockServiceConfig {
    /// Sin latencia; útil en tests.
    pub fn instant() -> Self {
        Self { latency: Duration::ZERO,
               ..Self::default() }
    }
}
