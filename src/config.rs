//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y las traduce a los
//! parámetros del motor (`EngineSettings`) y de los servicios simulados
//! (`MockServiceConfig`).
use std::env;
use std::time::Duration;

use once_cell::sync::Lazy;
use rideflow_adapters::MockServiceConfig;
use rideflow_core::constants::DEFAULT_RESEND_COOLDOWN_SECS;
use rideflow_core::EngineSettings;

use crate::errors::AppError;

pub const RESEND_COOLDOWN_VAR: &str = "RIDEFLOW_RESEND_COOLDOWN_SECS";
pub const SERVICE_LATENCY_VAR: &str = "RIDEFLOW_SERVICE_LATENCY_MS";
pub const FAILING_ACCOUNT_VAR: &str = "RIDEFLOW_FAILING_ACCOUNT";

const DEFAULT_SERVICE_LATENCY_MS: u64 = 900;
const DEFAULT_FAILING_ACCOUNT: &str = "0000000000";

/// `.env` se lee una vez por proceso.
static DOTENV: Lazy<()> = Lazy::new(|| {
    if let Ok(path) = dotenvy::dotenv() {
        log::debug!("config: loaded {}", path.display());
    }
});

/// Configuración de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Segundos antes de poder reenviar un código tras un envío exitoso. Sólo
    /// afecta a las acciones de reenvío (`send-otp`, `send-reset-code`).
    pub resend_cooldown_secs: i64,
    /// Latencia simulada de los servicios externos.
    pub service_latency_ms: u64,
    pub failing_account: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { resend_cooldown_secs: DEFAULT_RESEND_COOLDOWN_SECS,
               service_latency_ms: DEFAULT_SERVICE_LATENCY_MS,
               failing_account: DEFAULT_FAILING_ACCOUNT.to_string() }
    }
}

impl AppConfig {
    /// Lee la configuración del entorno (incluido `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        Lazy::force(&DOTENV);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();
        let resend_cooldown_secs = parse_var(&lookup, RESEND_COOLDOWN_VAR)?.unwrap_or(defaults.resend_cooldown_secs);
        if resend_cooldown_secs < 0 {
            return Err(AppError::Config(format!("{RESEND_COOLDOWN_VAR} must not be negative")));
        }
        Ok(Self { resend_cooldown_secs,
                  service_latency_ms: parse_var(&lookup, SERVICE_LATENCY_VAR)?.unwrap_or(defaults.service_latency_ms),
                  failing_account: lookup(FAILING_ACCOUNT_VAR).unwrap_or(defaults.failing_account) })
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings::default().with_resend_cooldown(chrono::Duration::seconds(self.resend_cooldown_secs))
    }

    pub fn mock_services(&self) -> MockServiceConfig {
        MockServiceConfig { latency: Duration::from_millis(self.service_latency_ms),
                            failing_account: self.failing_account.clone(),
                            ..MockServiceConfig::default() }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
    where F: Fn(&str) -> Option<String>,
          T: std::str::FromStr
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim()
                        .parse::<T>()
                        .map(Some)
                        .map_err(|_| AppError::Config(format!("{key}: invalid value '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.resend_cooldown_secs, 60);
        assert_eq!(config.mock_services().latency, Duration::from_millis(900));
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[(RESEND_COOLDOWN_VAR, "5"),
                                                    (SERVICE_LATENCY_VAR, "0"),
                                                    (FAILING_ACCOUNT_VAR, "9999999999")])).expect("config");
        assert_eq!(config.resend_cooldown_secs, 5);
        let policy = config.engine_settings().action_policy;
        assert_eq!(policy.resend_cooldown(), chrono::Duration::seconds(5));
        assert_eq!(policy.cooldown_for("resolve-account-name"), chrono::Duration::zero());
        assert_eq!(config.mock_services().failing_account, "9999999999");
        assert!(config.mock_services().latency.is_zero());
    }

    #[test]
    fn rejects_garbage() {
        let err = AppConfig::from_lookup(lookup(&[(SERVICE_LATENCY_VAR, "fast")])).unwrap_err();
        assert_eq!(err.to_string(), "configuration error: RIDEFLOW_SERVICE_LATENCY_MS: invalid value 'fast'");
        assert!(AppConfig::from_lookup(lookup(&[(RESEND_COOLDOWN_VAR, "-1")])).is_err());
    }
}
