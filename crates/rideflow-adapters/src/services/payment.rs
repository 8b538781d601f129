//! Pasarela de pagos simulada: cobro de reservas y verificación del PIN de pago.
//!
//! Tras `max_attempts` PINs incorrectos seguidos la verificación queda
//! bloqueada durante `lockout`.
use std::sync::Mutex;
use std::time::Duration;

use log::{info, warn};
use rideflow_core::{AsyncActionResult, FieldValues};
use rideflow_domain::actions;
use serde_json::json;
use tokio::time::Instant;

#[derive(Debug, Default)]
struct PinAttempts {
    failures: u32,
    locked_until: Option<Instant>,
}

#[derive(Debug)]
pub struct PaymentGateway {
    current_pin: String,
    max_attempts: u32,
    lockout: Duration,
    attempts: Mutex<PinAttempts>,
}

impl PaymentGateway {
    pub fn new(current_pin: impl Into<String>, max_attempts: u32, lockout: Duration) -> Self {
        Self { current_pin: current_pin.into(),
               max_attempts,
               lockout,
               attempts: Mutex::new(PinAttempts::default()) }
    }

    pub fn handle(&self, action: &str, payload: &FieldValues) -> Option<AsyncActionResult> {
        let result = match action {
            actions::SUBMIT_PAYMENT => {
                info!("payment:charge method={}", payload.get("paymentMethod").map(String::as_str).unwrap_or("-"));
                AsyncActionResult::Succeeded(json!({ "status": "paid" }))
            }
            actions::VERIFY_PIN => self.verify_pin(payload.get("oldPin").map(String::as_str).unwrap_or("")),
            _ => return None,
        };
        Some(result)
    }

    fn verify_pin(&self, pin: &str) -> AsyncActionResult {
        let mut attempts = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        if let Some(until) = attempts.locked_until {
            if now < until {
                return AsyncActionResult::Failed("Too many attempts. Try again after 60 seconds.".to_string());
            }
            *attempts = PinAttempts::default();
        }
        if pin == self.current_pin {
            attempts.failures = 0;
            return AsyncActionResult::Succeeded(json!({ "valid": true }));
        }
        attempts.failures += 1;
        if attempts.failures >= self.max_attempts {
            warn!("payment:pin locked");
            attempts.locked_until = Some(now + self.lockout);
            return AsyncActionResult::Failed("Too many attempts. Try again after 60 seconds.".to_string());
        }
        AsyncActionResult::Failed(format!("Incorrect PIN. You have {} attempt(s) left",
                                          self.max_attempts - attempts.failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rideflow_core::field_values;

    #[test]
    fn wrong_pins_count_down_then_lock() {
        let gateway = PaymentGateway::new("1234", 3, Duration::from_secs(60));
        let wrong = field_values! { "oldPin" => "0000" };
        let reason = |r: Option<AsyncActionResult>| r.and_then(|r| r.failure_reason().map(str::to_string));
        assert_eq!(reason(gateway.handle(actions::VERIFY_PIN, &wrong)).as_deref(),
                   Some("Incorrect PIN. You have 2 attempt(s) left"));
        gateway.handle(actions::VERIFY_PIN, &wrong);
        assert_eq!(reason(gateway.handle(actions::VERIFY_PIN, &wrong)).as_deref(),
                   Some("Too many attempts. Try again after 60 seconds."));
        // bloqueado incluso con el PIN correcto
        let right = field_values! { "oldPin" => "1234" };
        assert!(gateway.handle(actions::VERIFY_PIN, &right).is_some_and(|r| !r.is_success()));
    }

    #[test]
    fn correct_pin_resets_failures() {
        let gateway = PaymentGateway::new("1234", 3, Duration::from_secs(60));
        gateway.handle(actions::VERIFY_PIN, &field_values! { "oldPin" => "0000" });
        assert!(gateway.handle(actions::VERIFY_PIN, &field_values! { "oldPin" => "1234" })
                       .is_some_and(|r| r.is_success()));
    }
}
