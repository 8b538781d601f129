//! Definiciones de los wizards de la app, como datos.

pub mod account;
pub mod booking;
pub mod courier;
pub mod security;
pub mod wallet;

pub use booking::BookingReceipt;
pub use wallet::WithdrawalReceipt;
