//! rideflow-domain: los wizards de la app de viajes y couriers expresados como
//! definiciones de flujo, más las reglas de tarifa y los recibos.

pub mod actions;
pub mod catalog;
pub mod errors;
pub mod fare;
pub mod fields;
pub mod flows;

pub use catalog::FlowCatalog;
pub use errors::DomainError;
pub use fare::{fare_for, fare_from_values, format_naira, BookingType};
pub use flows::{BookingReceipt, WithdrawalReceipt};
