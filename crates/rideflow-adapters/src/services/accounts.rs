//! Backend de cuentas simulado: alta de usuarios y de couriers.
use log::info;
use rideflow_core::{reference_for, AsyncActionResult, FieldValues};
use rideflow_domain::actions;
use serde_json::json;

#[derive(Debug, Clone, Copy, Default)]
pub struct AccountBackend;

impl AccountBackend {
    pub fn handle(&self, action: &str, payload: &FieldValues) -> Option<AsyncActionResult> {
        let result = match action {
            actions::CREATE_ACCOUNT => {
                info!("accounts:create email={}", payload.get("email").map(String::as_str).unwrap_or("-"));
                AsyncActionResult::Succeeded(json!({ "user_id": reference_for("USR-", payload) }))
            }
            actions::REGISTER_COURIER => {
                AsyncActionResult::Succeeded(json!({ "status": "pending_review", "courier_id": reference_for("CR-", payload) }))
            }
            _ => return None,
        };
        Some(result)
    }
}
