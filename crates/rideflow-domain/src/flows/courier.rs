//! Flujos de courier: alta de repartidor y envío programado.
use once_cell::sync::Lazy;
use regex::Regex;
use rideflow_core::{CoreEngineError, FieldSpec, FlowDefinition, StepDefinition, SummaryProjector};

use crate::actions;
use crate::fields::{email, phone, text};

pub const COURIER_REGISTRATION: &str = "courier-registration";
pub const SCHEDULE_COURIER: &str = "schedule-courier";

pub const VEHICLE_TYPES: [&str; 3] = ["bike", "car", "van"];

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

pub fn courier_registration() -> Result<FlowDefinition, CoreEngineError> {
    FlowDefinition::builder(COURIER_REGISTRATION).step(StepDefinition::new("personal").titled("Personal Details")
                                                                                      .field(text("fullName", "Full Name"))
                                                                                      .field(phone("phone"))
                                                                                      .field(email("email"))
                                                                                      .field(text("address", "Address")))
                                                 .step(StepDefinition::new("vehicle").titled("Vehicle & Documents")
                                                                                     .field(FieldSpec::new("vehicleType").labeled("Vehicle Type")
                                                                                                                         .required()
                                                                                                                         .message("Select your vehicle")
                                                                                                                         .one_of(VEHICLE_TYPES))
                                                                                     .field(text("profilePhoto", "Profile Photo"))
                                                                                     .field(text("idPhoto", "Government-issued ID")))
                                                 .step(StepDefinition::new("terms").titled("Terms of Service")
                                                                                   .field(FieldSpec::new("termsAccepted").labeled("Terms")
                                                                                                                         .one_of(["true"])
                                                                                                                         .message("You must accept the terms"))
                                                                                   .requires_action(actions::REGISTER_COURIER))
                                                 .project_with(SummaryProjector::new("Courier application submitted").line("Name",
                                                                                                                            "fullName")
                                                                                                                      .line("Vehicle",
                                                                                                                            "vehicleType")
                                                                                                                      .with_reference("CR-"))
                                                 .build()
}

pub fn schedule_courier() -> Result<FlowDefinition, CoreEngineError> {
    FlowDefinition::builder(SCHEDULE_COURIER).step(StepDefinition::new("delivery").titled("Schedule Courier")
                                                                                  .field(text("sender", "Sender Name"))
                                                                                  .field(text("receiver", "Receiver Name"))
                                                                                  .field(text("pickup", "Pickup Location"))
                                                                                  .field(text("dropoff", "Dropoff Location"))
                                                                                  .field(text("description",
                                                                                              "Package Description").max_length(200))
                                                                                  .field(FieldSpec::new("deliveryDate").labeled("Delivery Date")
                                                                                                                       .required()
                                                                                                                       .pattern(DATE_RE.clone())
                                                                                                                       .message("Use YYYY-MM-DD")))
                                             .project_with(SummaryProjector::new("Courier Scheduled").line("Sender", "sender")
                                                                                                     .line("Receiver", "receiver")
                                                                                                     .line("From", "pickup")
                                                                                                     .line("To", "dropoff")
                                                                                                     .line("Package", "description")
                                                                                                     .line("Date", "deliveryDate")
                                                                                                     .with_reference("DLV-"))
                                             .build()
}
