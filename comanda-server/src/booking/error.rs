use chrono::{NaiveDate, NaiveTime};
use shared::models::ReservationStatus;
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Booking subsystem errors
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Table not found: {0}")]
    TableNotFound(i64),

    #[error("Table number {0} already exists")]
    TableNumberExists(i32),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(i64),

    #[error("Party size {party_size} exceeds table capacity {capacity}")]
    CapacityExceeded { party_size: i32, capacity: i32 },

    #[error("Table {table_id} is already reserved for {date} {time}")]
    SlotConflict {
        table_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    },

    #[error("Cannot transition reservation from {from:?} to {to:?}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("{0}")]
    Validation(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::TableNotFound(id) => {
                AppError::with_message(ErrorCode::TableNotFound, format!("Table {} not found", id))
                    .with_detail("table_id", id)
            }
            BookingError::TableNumberExists(number) => AppError::with_message(
                ErrorCode::TableNumberExists,
                format!("Table number {} already exists", number),
            )
            .with_detail("number", number),
            BookingError::ReservationNotFound(id) => AppError::with_message(
                ErrorCode::ReservationNotFound,
                format!("Reservation {} not found", id),
            )
            .with_detail("reservation_id", id),
            BookingError::CapacityExceeded {
                party_size,
                capacity,
            } => AppError::with_message(
                ErrorCode::CapacityExceeded,
                format!(
                    "Party size {} exceeds table capacity {}",
                    party_size, capacity
                ),
            )
            .with_detail("party_size", party_size)
            .with_detail("capacity", capacity),
            BookingError::SlotConflict {
                table_id,
                date,
                time,
            } => AppError::with_message(
                ErrorCode::SlotConflict,
                format!(
                    "Table {} is already reserved for {} {}",
                    table_id, date, time
                ),
            )
            .with_detail("table_id", table_id)
            .with_detail("date", date.to_string())
            .with_detail("time", time.to_string()),
            BookingError::InvalidTransition { from, to } => AppError::with_message(
                ErrorCode::InvalidTransition,
                format!(
                    "Cannot transition reservation from {:?} to {:?}",
                    from, to
                ),
            ),
            BookingError::Validation(msg) => AppError::validation(msg),
        }
    }
}

impl From<AppError> for BookingError {
    fn from(err: AppError) -> Self {
        BookingError::Validation(err.message)
    }
}
