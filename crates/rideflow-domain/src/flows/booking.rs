//! Reserva de viaje → pago → recibo.
use once_cell::sync::Lazy;
use regex::Regex;
use rideflow_core::{reference_for, CoreEngineError, FieldSpec, FieldValues, FlowDefinition, ReceiptProjection,
                    ReceiptProjector, StepDefinition};

use crate::actions;
use crate::fare::{fare_from_values, format_naira, BookingType};
use crate::fields::{pin, text};

pub const BOOKING: &str = "booking";

pub const BANK_TRANSFER: &str = "Bank Transfer";
pub const CREDIT_CARD: &str = "Credit Card";

static SEATS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]*$").expect("seats pattern compiles"));
static CARD_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}( ?[0-9]{4}){2,3}$").expect("card pattern compiles"));
static EXPIRY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{2}$").expect("expiry pattern compiles"));

fn card_field(name: &str, label: &str) -> FieldSpec {
    text(name, label).message("Please fill all card details.").when("paymentMethod", CREDIT_CARD)
}

pub fn booking() -> Result<FlowDefinition, CoreEngineError> {
    let trip = StepDefinition::new("details").titled("Booking Details")
                                             .field(text("passengerName", "Passenger"))
                                             .field(text("carType", "Car Type"))
                                             .field(text("departureTime", "Departure Time"))
                                             .field(FieldSpec::new("bookingType").labeled("Booking Type")
                                                                                 .required()
                                                                                 .one_of(BookingType::ALL))
                                             .field(FieldSpec::new("groupSeats").labeled("Seats")
                                                                                .required()
                                                                                .pattern(SEATS_RE.clone())
                                                                                .message("Enter the number of seats")
                                                                                .when("bookingType", "group"))
                                             .field(text("pickupLocation", "Pickup Location").when("bookingType", "drop"));

    let payment = StepDefinition::new("payment").titled("Payment")
                                                .field(FieldSpec::new("paymentMethod").labeled("Payment Method")
                                                                                      .required()
                                                                                      .one_of([BANK_TRANSFER, CREDIT_CARD]))
                                                .field(card_field("cardName", "Name on Card"))
                                                .field(card_field("cardNumber", "Card Number").pattern(CARD_NUMBER_RE.clone()))
                                                .field(card_field("expiryDate", "Expiry Date").pattern(EXPIRY_RE.clone())
                                                                                              .message("Use MM/YY"))
                                                .field(card_field("cvv", "CVV").exact_digits(3))
                                                .field(pin("transferPin", "4-Digit Transfer PIN").message("Please enter a valid 4-digit transfer PIN.")
                                                                                               .when("paymentMethod", BANK_TRANSFER))
                                                .requires_action(actions::SUBMIT_PAYMENT);

    FlowDefinition::builder(BOOKING).step(trip)
                                    .step(payment)
                                    .project_with(BookingReceipt)
                                    .build()
}

/// Recibo de pago con la tarifa calculada a partir del tipo de reserva.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingReceipt;

impl ReceiptProjector for BookingReceipt {
    fn project(&self, flow: &str, values: &FieldValues) -> ReceiptProjection {
        let get = |k: &str| values.get(k).map(String::as_str).unwrap_or("-");
        let booking_type = get("bookingType");
        let mut receipt = ReceiptProjection::new(flow, "Payment Successful").line("Passenger", get("passengerName"))
                                                                           .line("Payment Method", get("paymentMethod"))
                                                                           .line("Car Type", get("carType"))
                                                                           .line("Departure Time", get("departureTime"))
                                                                           .line("Booking Type", booking_type);
        match booking_type.parse::<BookingType>() {
            Ok(BookingType::Group) => receipt = receipt.line("Seats", get("groupSeats")),
            Ok(BookingType::Drop) => receipt = receipt.line("Pickup", get("pickupLocation")),
            _ => {}
        }
        if let Ok(fare) = fare_from_values(booking_type, values.get("groupSeats").map(String::as_str)) {
            receipt = receipt.with_total(format_naira(fare));
        }
        receipt.with_reference(reference_for("REC-", values))
    }
}
