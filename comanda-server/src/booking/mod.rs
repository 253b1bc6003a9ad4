//! Tables and reservations
//!
//! Booking validation (capacity, slot conflicts) and the confirm/cancel
//! flows with their table-status side effects. A slot is the
//! (table, date, time) tuple reservations compete for; only CONFIRMED
//! reservations hold one.

pub mod conflict;
mod error;
mod service;

#[cfg(test)]
mod tests;

pub use error::{BookingError, BookingResult};
pub use service::{ReservationService, TableService};
