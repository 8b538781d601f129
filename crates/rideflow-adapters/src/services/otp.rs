//! Gateway SMS/email simulado: envío y verificación de códigos.
use log::info;
use rideflow_core::{AsyncActionResult, FieldValues};
use rideflow_domain::actions;
use serde_json::json;

#[derive(Debug, Clone)]
pub struct OtpGateway {
    accepted_code: String,
}

impl OtpGateway {
    pub fn new(accepted_code: impl Into<String>) -> Self {
        Self { accepted_code: accepted_code.into() }
    }

    pub fn handle(&self, action: &str, payload: &FieldValues) -> Option<AsyncActionResult> {
        let result = match action {
            actions::SEND_OTP | actions::SEND_RESET_CODE => {
                let destination = ["newPhone", "phone", "email"].iter()
                                                                  .find_map(|k| payload.get(*k).filter(|v| !v.is_empty()))
                                                                  .cloned()
                                                                  .unwrap_or_default();
                info!("otp:send to={destination}");
                AsyncActionResult::Succeeded(json!({ "sent": true, "to": destination }))
            }
            actions::VERIFY_CODE => match payload.get("code") {
                Some(code) if *code == self.accepted_code => AsyncActionResult::Succeeded(json!({ "verified": true })),
                _ => AsyncActionResult::Failed("Invalid OTP".to_string()),
            },
            _ => return None,
        };
        Some(result)
    }
}
