//! Campos recurrentes de las pantallas (teléfono, contraseña, PIN, código).
use rideflow_core::FieldSpec;

pub const PHONE_DIGITS: usize = 11;
pub const PASSWORD_DIGITS: usize = 6;
pub const PIN_DIGITS: usize = 4;
pub const OTP_DIGITS: usize = 6;
pub const ACCOUNT_DIGITS: usize = 10;

pub fn text(name: &str, label: &str) -> FieldSpec {
    FieldSpec::new(name).labeled(label).required()
}

pub fn phone(name: &str) -> FieldSpec {
    FieldSpec::new(name).labeled("Phone Number")
                        .required()
                        .exact_digits(PHONE_DIGITS)
                        .message("Phone number must be exactly 11 digits")
}

pub fn email(name: &str) -> FieldSpec {
    FieldSpec::new(name).labeled("Email").required().email()
}

pub fn password(name: &str, label: &str) -> FieldSpec {
    FieldSpec::new(name).labeled(label)
                        .required()
                        .exact_digits(PASSWORD_DIGITS)
                        .message("Password must be exactly 6 digits")
}

pub fn pin(name: &str, label: &str) -> FieldSpec {
    FieldSpec::new(name).labeled(label)
                        .required()
                        .exact_digits(PIN_DIGITS)
                        .message("PIN must be 4 digits")
}

pub fn otp_code(name: &str) -> FieldSpec {
    FieldSpec::new(name).labeled("Verification Code")
                        .required()
                        .exact_digits(OTP_DIGITS)
}

/// Confirmación: obligatoria e igual a `other`.
pub fn confirmation(name: &str, other: &str, mismatch: &str) -> FieldSpec {
    FieldSpec::new(name).labeled("Confirm")
                        .required()
                        .equals_field(other)
                        .message(mismatch)
}
