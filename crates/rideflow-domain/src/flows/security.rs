//! Ajustes de seguridad: contraseña, PINs, teléfono y verificación en dos pasos.
//!
//! Los flujos "enviar código / ingresar código" comparten la misma forma: un
//! step cuya acción envía el OTP (con cooldown de reenvío) y un step cuya
//! acción lo verifica.
use rideflow_core::{CoreEngineError, FieldSpec, FlowDefinition, StepDefinition, SummaryProjector};

use crate::actions;
use crate::fields::{confirmation, otp_code, password, phone, pin};

pub const CHANGE_PASSWORD: &str = "change-password";
pub const CHANGE_PIN: &str = "change-pin";
pub const RESET_PAYMENT_PIN: &str = "reset-payment-pin";
pub const CHANGE_PHONE: &str = "change-phone";
pub const TWO_FACTOR_SETUP: &str = "two-factor-setup";
pub const VERIFY_OTP: &str = "verify-otp";

pub fn change_password() -> Result<FlowDefinition, CoreEngineError> {
    FlowDefinition::builder(CHANGE_PASSWORD).step(StepDefinition::new("passwords").titled("Change Password")
                                                                                  .field(FieldSpec::new("currentPassword").labeled("Current Password")
                                                                                                                          .required())
                                                                                  .field(password("newPassword",
                                                                                                  "New Password"))
                                                                                  .field(confirmation("confirmPassword",
                                                                                                      "newPassword",
                                                                                                      "Passwords do not match")))
                                            .project_with(SummaryProjector::new("Password changed successfully"))
                                            .build()
}

/// El PIN actual se verifica contra el servicio antes de pedir el nuevo.
pub fn change_pin() -> Result<FlowDefinition, CoreEngineError> {
    FlowDefinition::builder(CHANGE_PIN).step(StepDefinition::new("current").titled("Enter Current PIN")
                                                                           .field(pin("oldPin", "Current PIN"))
                                                                           .requires_action(actions::VERIFY_PIN))
                                       .step(StepDefinition::new("new").titled("Set New PIN")
                                                                       .field(pin("newPin", "New PIN"))
                                                                       .field(confirmation("confirmPin", "newPin", "PINs do not match")))
                                       .project_with(SummaryProjector::new("PIN changed successfully"))
                                       .build()
}

/// Olvidó el PIN: primero el código enviado al teléfono, luego el PIN nuevo.
pub fn reset_payment_pin() -> Result<FlowDefinition, CoreEngineError> {
    FlowDefinition::builder(RESET_PAYMENT_PIN).step(sent_code_step("Verify OTP"))
                                              .step(StepDefinition::new("pin").titled("Reset Payment PIN")
                                                                              .field(pin("newPin", "New PIN"))
                                                                              .field(confirmation("confirmPin",
                                                                                                  "newPin",
                                                                                                  "PINs do not match")))
                                              .project_with(SummaryProjector::new("Payment PIN reset successfully"))
                                              .build()
}

fn otp_steps(phone_field: &str) -> [StepDefinition; 2] {
    [StepDefinition::new("phone").titled("Enter Phone Number")
                                 .field(phone(phone_field))
                                 .requires_action(actions::SEND_OTP),
     StepDefinition::new("code").titled("Enter Verification Code")
                                .field(otp_code("code"))
                                .requires_action(actions::VERIFY_CODE)
                                .resends(actions::SEND_OTP)]
}

pub fn change_phone() -> Result<FlowDefinition, CoreEngineError> {
    let [phone_step, code_step] = otp_steps("newPhone");
    FlowDefinition::builder(CHANGE_PHONE).step(phone_step)
                                         .step(code_step)
                                         .project_with(SummaryProjector::new("Phone number updated").line("New Phone Number",
                                                                                                          "newPhone"))
                                         .build()
}

pub fn two_factor_setup() -> Result<FlowDefinition, CoreEngineError> {
    let [phone_step, code_step] = otp_steps("phone");
    FlowDefinition::builder(TWO_FACTOR_SETUP).step(phone_step)
                                             .step(code_step)
                                             .project_with(SummaryProjector::new("2FA enabled").line("Phone Number", "phone"))
                                             .build()
}

/// Step de verificación de un código enviado por la pantalla anterior: el
/// reenvío arranca en cooldown.
fn sent_code_step(title: &str) -> StepDefinition {
    StepDefinition::new("code").titled(title)
                               .field(otp_code("code"))
                               .requires_action(actions::VERIFY_CODE)
                               .resends(actions::SEND_OTP)
                               .cooldown_on_entry(actions::SEND_OTP)
}

/// Pantalla suelta de verificación: el código ya fue enviado, sólo se verifica.
pub fn verify_otp() -> Result<FlowDefinition, CoreEngineError> {
    FlowDefinition::builder(VERIFY_OTP).step(sent_code_step("Verify OTP"))
                                       .project_with(SummaryProjector::new("Verification successful"))
                                       .build()
}
