//! Tarifas de reserva (Naira).
//!
//! - `self`: tarifa base.
//! - `group`: asientos × tarifa base.
//! - `drop`: tarifa fija de vehículo completo.
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

pub const BASE_FARE: Decimal = Decimal::from_parts(3500, 0, 0, false, 0);
pub const DROP_FARE: Decimal = Decimal::from_parts(15000, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    #[serde(rename = "self")]
    Solo,
    Group,
    Drop,
}

impl BookingType {
    pub const ALL: [&'static str; 3] = ["self", "group", "drop"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Solo => "self",
            BookingType::Group => "group",
            BookingType::Drop => "drop",
        }
    }
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self" => Ok(BookingType::Solo),
            "group" => Ok(BookingType::Group),
            "drop" => Ok(BookingType::Drop),
            other => Err(DomainError::InvalidBookingType(other.to_string())),
        }
    }
}

/// Tarifa total. `seats` sólo se usa en reservas de grupo.
pub fn fare_for(kind: BookingType, seats: u32) -> Decimal {
    match kind {
        BookingType::Solo => BASE_FARE,
        BookingType::Group => BASE_FARE * Decimal::from(seats),
        BookingType::Drop => DROP_FARE,
    }
}

/// Tarifa a partir de los valores crudos del formulario.
pub fn fare_from_values(booking_type: &str, seats: Option<&str>) -> Result<Decimal, DomainError> {
    let kind = booking_type.parse::<BookingType>()?;
    let seats = match kind {
        BookingType::Group => {
            let raw = seats.unwrap_or("");
            raw.trim().parse::<u32>().map_err(|_| DomainError::InvalidAmount(raw.to_string()))?
        }
        _ => 1,
    };
    Ok(fare_for(kind, seats))
}

/// Formato de moneda de la app: `₦3,500` / `₦52.50`.
pub fn format_naira(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(format!("{f:0<2}"))),
        None => (text.clone(), None),
    };
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}₦{grouped}.{frac}"),
        None => format!("{sign}₦{grouped}"),
    }
}

/// Parsea un monto ingresado por el usuario.
pub fn parse_amount(raw: &str) -> Result<Decimal, DomainError> {
    Decimal::from_str(raw.trim()).map_err(|_| DomainError::InvalidAmount(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fares_follow_booking_type() {
        assert_eq!(fare_for(BookingType::Solo, 1), Decimal::from(3500));
        assert_eq!(fare_for(BookingType::Group, 4), Decimal::from(14000));
        assert_eq!(fare_for(BookingType::Drop, 1), Decimal::from(15000));
    }

    #[test]
    fn fare_from_raw_values() {
        assert_eq!(fare_from_values("group", Some("3")), Ok(Decimal::from(10500)));
        assert_eq!(fare_from_values("self", None), Ok(Decimal::from(3500)));
        assert_eq!(fare_from_values("taxi", None), Err(DomainError::InvalidBookingType("taxi".into())));
        assert_eq!(fare_from_values("group", Some("")), Err(DomainError::InvalidAmount("".into())));
    }

    #[test]
    fn naira_formatting() {
        assert_eq!(format_naira(Decimal::from(3500)), "₦3,500");
        assert_eq!(format_naira(Decimal::from(1_234_567)), "₦1,234,567");
        assert_eq!(format_naira(Decimal::new(5250, 2)), "₦52.50");
        assert_eq!(format_naira(Decimal::from(500)), "₦500");
    }
}
