//! Booking rule checks
//!
//! Pure functions over already-loaded entities; the service runs them
//! inside the store's write section so concurrent confirms of the same
//! slot serialize.

use chrono::{NaiveDate, NaiveTime};
use shared::models::{Reservation, ReservationStatus, Table};

use super::error::{BookingError, BookingResult};

/// Reject a party larger than the table
pub fn check_capacity(table: &Table, party_size: i32) -> BookingResult<()> {
    if party_size > table.capacity {
        return Err(BookingError::CapacityExceeded {
            party_size,
            capacity: table.capacity,
        });
    }
    Ok(())
}

/// Reject when another CONFIRMED reservation holds the same slot
///
/// PENDING, CANCELLED and COMPLETED reservations never conflict.
/// `exclude` removes the reservation being updated from consideration.
pub fn check_slot<'a>(
    reservations: impl IntoIterator<Item = &'a Reservation>,
    table_id: i64,
    date: NaiveDate,
    time: NaiveTime,
    exclude: Option<i64>,
) -> BookingResult<()> {
    let conflicting = reservations.into_iter().any(|r| {
        exclude != Some(r.id)
            && r.table_id == table_id
            && r.date == date
            && r.time == time
            && r.status == ReservationStatus::Confirmed
    });
    if conflicting {
        return Err(BookingError::SlotConflict {
            table_id,
            date,
            time,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TableStatus;

    fn table(capacity: i32) -> Table {
        Table {
            id: 1,
            number: 1,
            capacity,
            status: TableStatus::Available,
            location: None,
            reserved_by: None,
        }
    }

    fn reservation(id: i64, status: ReservationStatus) -> Reservation {
        Reservation {
            id,
            table_id: 1,
            customer_name: "Ana".to_string(),
            customer_phone: "600000000".to_string(),
            party_size: 2,
            date: NaiveDate::from_ymd_opt(2026, 8, 14).unwrap(),
            time: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
            status,
            created_at: 0,
            notes: None,
        }
    }

    fn slot() -> (NaiveDate, NaiveTime) {
        (
            NaiveDate::from_ymd_opt(2026, 8, 14).unwrap(),
            NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_capacity_boundary() {
        let t = table(2);
        assert!(check_capacity(&t, 2).is_ok());
        assert!(matches!(
            check_capacity(&t, 3),
            Err(BookingError::CapacityExceeded {
                party_size: 3,
                capacity: 2
            })
        ));
    }

    #[test]
    fn test_confirmed_reservation_conflicts() {
        let existing = [reservation(1, ReservationStatus::Confirmed)];
        let (date, time) = slot();
        assert!(matches!(
            check_slot(&existing, 1, date, time, None),
            Err(BookingError::SlotConflict { table_id: 1, .. })
        ));
    }

    #[test]
    fn test_non_confirmed_never_conflict() {
        let (date, time) = slot();
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Cancelled,
            ReservationStatus::Completed,
        ] {
            let existing = [reservation(1, status)];
            assert!(check_slot(&existing, 1, date, time, None).is_ok());
        }
    }

    #[test]
    fn test_different_slot_does_not_conflict() {
        let existing = [reservation(1, ReservationStatus::Confirmed)];
        let (date, time) = slot();

        // Different table
        assert!(check_slot(&existing, 2, date, time, None).is_ok());
        // Different time
        let later = NaiveTime::from_hms_opt(21, 0, 0).unwrap();
        assert!(check_slot(&existing, 1, date, later, None).is_ok());
        // Different date
        let tomorrow = date.succ_opt().unwrap();
        assert!(check_slot(&existing, 1, tomorrow, time, None).is_ok());
    }

    #[test]
    fn test_exclude_skips_self() {
        let existing = [reservation(1, ReservationStatus::Confirmed)];
        let (date, time) = slot();
        assert!(check_slot(&existing, 1, date, time, Some(1)).is_ok());
        assert!(check_slot(&existing, 1, date, time, Some(2)).is_err());
    }
}
