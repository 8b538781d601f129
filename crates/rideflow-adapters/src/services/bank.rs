//! Directorio bancario simulado para retiros.
use log::{info, warn};
use rideflow_core::{AsyncActionResult, FieldValues};
use rideflow_domain::actions;
use serde_json::json;

pub const BANKS: [&str; 3] = ["Access Bank", "GTBank", "Zenith Bank"];

#[derive(Debug, Clone)]
pub struct BankDirectory {
    failing_account: String,
}

impl BankDirectory {
    pub fn new(failing_account: impl Into<String>) -> Self {
        Self { failing_account: failing_account.into() }
    }

    pub fn handle(&self, action: &str, payload: &FieldValues) -> Option<AsyncActionResult> {
        let account = payload.get("accountNumber").map(String::as_str).unwrap_or("");
        let result = match action {
            actions::LOOKUP_BANKS if account == self.failing_account => {
                warn!("bank:lookup no banks for account");
                AsyncActionResult::Failed("No banks found for this account number.".to_string())
            }
            actions::LOOKUP_BANKS => AsyncActionResult::Succeeded(json!({ "banks": BANKS.join(",") })),
            actions::RESOLVE_ACCOUNT_NAME => match payload.get("bank") {
                Some(bank) if BANKS.contains(&bank.as_str()) => {
                    AsyncActionResult::Succeeded(json!({ "account_name": format!("{bank} User") }))
                }
                _ => AsyncActionResult::Failed("Bank not found".to_string()),
            },
            actions::SUBMIT_WITHDRAWAL => {
                info!("bank:withdrawal amount={}", payload.get("amount").map(String::as_str).unwrap_or("-"));
                AsyncActionResult::Succeeded(json!({ "status": "successful" }))
            }
            _ => return None,
        };
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rideflow_core::field_values;

    #[test]
    fn failing_account_has_no_banks() {
        let directory = BankDirectory::new("0000000000");
        let result = directory.handle(actions::LOOKUP_BANKS, &field_values! { "accountNumber" => "0000000000" });
        assert_eq!(result.as_ref().and_then(|r| r.failure_reason()),
                   Some("No banks found for this account number."));
    }

    #[test]
    fn account_name_is_derived_from_bank() {
        let directory = BankDirectory::new("0000000000");
        let result = directory.handle(actions::RESOLVE_ACCOUNT_NAME, &field_values! { "bank" => "Zenith Bank" });
        assert_eq!(result, Some(AsyncActionResult::Succeeded(json!({ "account_name": "Zenith Bank User" }))));
    }
}
