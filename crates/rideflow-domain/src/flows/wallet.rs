//! Retiro a cuenta bancaria.
//!
//! 1. Número de cuenta (10 dígitos) → `lookup-banks` devuelve los bancos.
//! 2. Banco → `resolve-account-name` devuelve el titular.
//! 3. Monto (> 0).
//! 4. PIN de transacción (4 dígitos) → `submit-withdrawal`.
use rideflow_core::{reference_for, CoreEngineError, FieldSpec, FieldValues, FlowDefinition, ReceiptProjection,
                    ReceiptProjector, StepDefinition};

use crate::actions;
use crate::fare::{format_naira, parse_amount};
use crate::fields::{pin, ACCOUNT_DIGITS};

pub const WITHDRAW_TO_BANK: &str = "withdraw-to-bank";

/// Comisión fija mostrada en el recibo.
pub const WITHDRAWAL_FEE: &str = "₦52.50";

pub fn withdraw_to_bank() -> Result<FlowDefinition, CoreEngineError> {
    FlowDefinition::builder(WITHDRAW_TO_BANK).step(StepDefinition::new("account").titled("Enter Account Number")
                                                                                 .field(FieldSpec::new("accountNumber").labeled("Account Number")
                                                                                                                       .required()
                                                                                                                       .exact_digits(ACCOUNT_DIGITS)
                                                                                                                       .message("Account number must be 10 digits"))
                                                                                 .requires_action(actions::LOOKUP_BANKS)
                                                                                 .captures("banks", "availableBanks"))
                                             .step(StepDefinition::new("bank").titled("Select Bank")
                                                                              .field(FieldSpec::new("bank").labeled("Bank").required())
                                                                              .requires_action(actions::RESOLVE_ACCOUNT_NAME)
                                                                              .captures("account_name", "accountName"))
                                             .step(StepDefinition::new("amount").titled("Enter Amount")
                                                                                .field(FieldSpec::new("amount").labeled("Amount")
                                                                                                               .required()
                                                                                                               .positive_amount()
                                                                                                               .message("Enter a valid amount")))
                                             .step(StepDefinition::new("pin").titled("Confirm Withdrawal")
                                                                             .field(pin("pin", "Transaction PIN").message("Enter your 4-digit transaction PIN."))
                                                                             .requires_action(actions::SUBMIT_WITHDRAWAL))
                                             .project_with(WithdrawalReceipt)
                                             .build()
}

/// Recibo de retiro: referencia `TRX` + número de cuenta + 6 dígitos.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithdrawalReceipt;

impl ReceiptProjector for WithdrawalReceipt {
    fn project(&self, flow: &str, values: &FieldValues) -> ReceiptProjection {
        let get = |k: &str| values.get(k).map(String::as_str).unwrap_or("-");
        let amount = values.get("amount")
                           .and_then(|raw| parse_amount(raw).ok())
                           .map(format_naira)
                           .unwrap_or_else(|| "-".to_string());
        let reference = reference_for(&format!("TRX{}", get("accountNumber")), values);
        ReceiptProjection::new(flow, "Withdrawal Successful").line("Status", "Successful")
                                                            .line("Amount", amount.clone())
                                                            .line("Bank", get("bank"))
                                                            .line("Account Name", get("accountName"))
                                                            .line("Account Number", get("accountNumber"))
                                                            .line("Description", "Bank withdrawal")
                                                            .line("Fee", WITHDRAWAL_FEE)
                                                            .with_reference(reference)
                                                            .with_total(amount)
    }
}
