//! Acceso a la cuenta: login, registro, perfil y recuperación de contraseña.
use rideflow_core::{CoreEngineError, FieldSpec, FlowDefinition, StepDefinition, SummaryProjector};

use crate::actions;
use crate::fields::{confirmation, email, password, phone, text};

pub const LOGIN: &str = "login";
pub const SIGNUP: &str = "signup";
pub const FORGOT_PASSWORD: &str = "forgot-password";
pub const SET_NEW_PASSWORD: &str = "set-new-password";
pub const EDIT_PROFILE: &str = "edit-profile";

pub const MISSING_PROFILE_FIELDS: &str = "Please complete all required fields.";
pub const BIO_MAX_CHARS: usize = 160;

pub fn login() -> Result<FlowDefinition, CoreEngineError> {
    FlowDefinition::builder(LOGIN).step(StepDefinition::new("credentials").titled("Login")
                                                                          .field(phone("phone"))
                                                                          .field(password("password", "Password")))
                                  .project_with(SummaryProjector::new("Welcome back").line("Phone Number", "phone"))
                                  .build()
}

pub fn signup() -> Result<FlowDefinition, CoreEngineError> {
    FlowDefinition::builder(SIGNUP).step(StepDefinition::new("profile").titled("Create Account")
                                                                       .field(text("givenName", "Given Name"))
                                                                       .field(text("surname", "Surname"))
                                                                       .field(email("email"))
                                                                       .field(text("country", "Country"))
                                                                       .field(text("state", "State"))
                                                                       .field(text("address", "Home Address"))
                                                                       .field(phone("phone")))
                                   .step(StepDefinition::new("security").titled("Set Password")
                                                                        .field(password("password", "Password"))
                                                                        .field(confirmation("confirmPassword",
                                                                                            "password",
                                                                                            "Passwords do not match"))
                                                                        .requires_action(actions::CREATE_ACCOUNT))
                                   .project_with(SummaryProjector::new("Account created successfully").line("Name",
                                                                                                             "givenName")
                                                                                                       .line("Email",
                                                                                                             "email")
                                                                                                       .line("Phone Number",
                                                                                                             "phone"))
                                   .build()
}

/// El código se envía por teléfono o por email según `method`; sólo el campo
/// del método elegido es obligatorio.
pub fn forgot_password() -> Result<FlowDefinition, CoreEngineError> {
    FlowDefinition::builder(FORGOT_PASSWORD).step(StepDefinition::new("method").titled("Forgot Password")
                                                                               .field(FieldSpec::new("method").labeled("Reset via")
                                                                                                              .required()
                                                                                                              .one_of(["phone",
                                                                                                                       "email"]))
                                                                               .field(phone("phone").when("method", "phone"))
                                                                               .field(email("email").when("method", "email"))
                                                                               .requires_action(actions::SEND_RESET_CODE)
                                                                               .resends(actions::SEND_RESET_CODE))
                                            .project_with(SummaryProjector::new("Reset code sent").line("Phone Number",
                                                                                                        "phone")
                                                                                                  .line("Email", "email"))
                                            .build()
}

pub fn set_new_password() -> Result<FlowDefinition, CoreEngineError> {
    FlowDefinition::builder(SET_NEW_PASSWORD).step(StepDefinition::new("password").titled("Set New Password")
                                                                                  .field(password("newPassword",
                                                                                                  "New Password"))
                                                                                  .field(confirmation("confirmPassword",
                                                                                                      "newPassword",
                                                                                                      "Passwords do not match")))
                                             .project_with(SummaryProjector::new("Password reset successful"))
                                             .build()
}

/// Nombre, email y teléfono son obligatorios; la bio es libre pero acotada.
pub fn edit_profile() -> Result<FlowDefinition, CoreEngineError> {
    let required = |name: &str, label: &str| text(name, label).message(MISSING_PROFILE_FIELDS);
    FlowDefinition::builder(EDIT_PROFILE).step(StepDefinition::new("profile").titled("Edit Profile")
                                                                             .field(required("name", "Name"))
                                                                             .field(required("email", "Email").email())
                                                                             .field(required("phone", "Phone Number"))
                                                                             .field(FieldSpec::new("bio").labeled("Bio")
                                                                                                         .optional()
                                                                                                         .max_length(BIO_MAX_CHARS)))
                                         .project_with(SummaryProjector::new("Your profile has been updated successfully!")
                                                           .line("Name", "name")
                                                           .line("Email", "email")
                                                           .line("Phone Number", "phone"))
                                         .build()
}
