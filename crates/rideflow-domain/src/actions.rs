//! Nombres de las acciones con efectos secundarios que usan los flujos. Los
//! servicios (reales o simulados) despachan por estos nombres.

pub const SEND_OTP: &str = "send-otp";
pub const VERIFY_CODE: &str = "verify-code";
pub const CREATE_ACCOUNT: &str = "create-account";
pub const SEND_RESET_CODE: &str = "send-reset-code";
pub const VERIFY_PIN: &str = "verify-pin";
pub const LOOKUP_BANKS: &str = "lookup-banks";
pub const RESOLVE_ACCOUNT_NAME: &str = "resolve-account-name";
pub const SUBMIT_WITHDRAWAL: &str = "submit-withdrawal";
pub const SUBMIT_PAYMENT: &str = "submit-payment";
pub const REGISTER_COURIER: &str = "register-courier";

pub const ALL: [&str; 10] = [SEND_OTP,
                             VERIFY_CODE,
                             CREATE_ACCOUNT,
                             SEND_RESET_CODE,
                             VERIFY_PIN,
                             LOOKUP_BANKS,
                             RESOLVE_ACCOUNT_NAME,
                             SUBMIT_WITHDRAWAL,
                             SUBMIT_PAYMENT,
                             REGISTER_COURIER];
