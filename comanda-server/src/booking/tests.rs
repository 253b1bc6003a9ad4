//! Booking service tests

use chrono::{NaiveDate, NaiveTime};
use shared::models::{
    OperatorContext, OperatorRole, Reservation, ReservationCreate, ReservationStatus,
    ReservationUpdate, Table, TableCreate, TableStatus,
};

use crate::booking::{BookingError, ReservationService, TableService};
use crate::core::{AppState, Config};
use crate::utils::time::today;

fn test_state() -> AppState {
    AppState::initialize(&Config::from_env())
}

fn manager() -> OperatorContext {
    OperatorContext::new(1, "Carmen", OperatorRole::Manager)
}

fn seed_table(state: &AppState, number: i32, capacity: i32) -> Table {
    TableService::new(state)
        .create(&manager(), TableCreate {
            number,
            capacity,
            location: None,
        })
        .unwrap()
}

fn reservation_payload(table_id: i64, party_size: i32, date: NaiveDate) -> ReservationCreate {
    ReservationCreate {
        table_id,
        customer_name: "Ana García".to_string(),
        customer_phone: "600123456".to_string(),
        party_size,
        date,
        time: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
        notes: None,
    }
}

fn future_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()
}

fn create_confirmed(state: &AppState, table_id: i64, date: NaiveDate) -> Reservation {
    let service = ReservationService::new(state);
    let reservation = service
        .create(&manager(), reservation_payload(table_id, 2, date))
        .unwrap();
    service.confirm(&manager(), reservation.id).unwrap()
}

// ========================================================================
// Tables
// ========================================================================

#[test]
fn test_table_numbers_are_unique() {
    let state = test_state();
    let service = TableService::new(&state);

    seed_table(&state, 1, 4);
    let err = service
        .create(&manager(), TableCreate {
            number: 1,
            capacity: 2,
            location: None,
        })
        .unwrap_err();
    assert!(matches!(err, BookingError::TableNumberExists(1)));
}

#[test]
fn test_available_listing() {
    let state = test_state();
    let service = TableService::new(&state);

    let a = seed_table(&state, 1, 4);
    let b = seed_table(&state, 2, 4);
    service
        .change_status(&manager(), b.id, TableStatus::Maintenance)
        .unwrap();

    let available: Vec<i64> = service.available().iter().map(|t| t.id).collect();
    assert_eq!(available, vec![a.id]);
}

#[test]
fn test_manual_unreserve_clears_linkage() {
    let state = test_state();
    let table = seed_table(&state, 1, 4);
    let reservation = create_confirmed(&state, table.id, today(state.config.timezone));

    assert_eq!(
        state.store.tables.get(table.id).unwrap().reserved_by,
        Some(reservation.id)
    );

    TableService::new(&state)
        .change_status(&manager(), table.id, TableStatus::Available)
        .unwrap();
    assert_eq!(state.store.tables.get(table.id).unwrap().reserved_by, None);
}

// ========================================================================
// Reservation creation checks
// ========================================================================

#[test]
fn test_party_size_over_capacity_rejected() {
    let state = test_state();
    let table = seed_table(&state, 1, 2);
    let service = ReservationService::new(&state);

    let err = service
        .create(&manager(), reservation_payload(table.id, 3, future_date()))
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::CapacityExceeded {
            party_size: 3,
            capacity: 2
        }
    ));
}

#[test]
fn test_party_size_at_capacity_allowed() {
    let state = test_state();
    let table = seed_table(&state, 1, 2);
    let service = ReservationService::new(&state);

    let reservation = service
        .create(&manager(), reservation_payload(table.id, 2, future_date()))
        .unwrap();
    assert_eq!(reservation.status, ReservationStatus::Pending);
}

#[test]
fn test_create_against_confirmed_slot_rejected() {
    let state = test_state();
    let table = seed_table(&state, 1, 4);
    create_confirmed(&state, table.id, future_date());

    let err = ReservationService::new(&state)
        .create(&manager(), reservation_payload(table.id, 2, future_date()))
        .unwrap_err();
    assert!(matches!(err, BookingError::SlotConflict { .. }));
}

#[test]
fn test_pending_reservation_does_not_block_slot() {
    let state = test_state();
    let table = seed_table(&state, 1, 4);
    let service = ReservationService::new(&state);

    service
        .create(&manager(), reservation_payload(table.id, 2, future_date()))
        .unwrap();
    // Same slot again: the first one is only PENDING
    service
        .create(&manager(), reservation_payload(table.id, 2, future_date()))
        .unwrap();
}

// ========================================================================
// Confirm
// ========================================================================

#[test]
fn test_second_confirm_on_same_slot_rejected() {
    let state = test_state();
    let table = seed_table(&state, 1, 4);
    let service = ReservationService::new(&state);

    let first = service
        .create(&manager(), reservation_payload(table.id, 2, future_date()))
        .unwrap();
    let second = service
        .create(&manager(), reservation_payload(table.id, 2, future_date()))
        .unwrap();

    service.confirm(&manager(), first.id).unwrap();
    let err = service.confirm(&manager(), second.id).unwrap_err();
    assert!(matches!(err, BookingError::SlotConflict { .. }));

    // The loser stays PENDING
    assert_eq!(
        service.get(second.id).unwrap().status,
        ReservationStatus::Pending
    );
}

#[test]
fn test_reconfirm_rejected() {
    let state = test_state();
    let table = seed_table(&state, 1, 4);
    let reservation = create_confirmed(&state, table.id, future_date());

    let err = ReservationService::new(&state)
        .confirm(&manager(), reservation.id)
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::InvalidTransition {
            from: ReservationStatus::Confirmed,
            to: ReservationStatus::Confirmed
        }
    ));
}

#[test]
fn test_confirm_today_reserves_table() {
    let state = test_state();
    let table = seed_table(&state, 1, 4);
    let reservation = create_confirmed(&state, table.id, today(state.config.timezone));

    let table = state.store.tables.get(table.id).unwrap();
    assert_eq!(table.status, TableStatus::Reserved);
    assert_eq!(table.reserved_by, Some(reservation.id));
}

#[test]
fn test_confirm_future_date_leaves_table_alone() {
    let state = test_state();
    let table = seed_table(&state, 1, 4);
    create_confirmed(&state, table.id, future_date());

    let table = state.store.tables.get(table.id).unwrap();
    assert_eq!(table.status, TableStatus::Available);
    assert_eq!(table.reserved_by, None);
}

// ========================================================================
// Cancel and complete
// ========================================================================

#[test]
fn test_cancel_releases_linked_table() {
    let state = test_state();
    let table = seed_table(&state, 1, 4);
    let reservation = create_confirmed(&state, table.id, today(state.config.timezone));

    ReservationService::new(&state)
        .cancel(&manager(), reservation.id)
        .unwrap();

    let table = state.store.tables.get(table.id).unwrap();
    assert_eq!(table.status, TableStatus::Available);
    assert_eq!(table.reserved_by, None);
}

#[test]
fn test_cancelling_other_reservation_keeps_table_held() {
    let state = test_state();
    let table = seed_table(&state, 1, 4);
    let service = ReservationService::new(&state);

    // A confirmed for today at 20:30 and holds the table
    let holder = create_confirmed(&state, table.id, today(state.config.timezone));

    // B pending for the same table today at a different time
    let mut payload = reservation_payload(table.id, 2, today(state.config.timezone));
    payload.time = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
    let other = service.create(&manager(), payload).unwrap();

    // Cancelling B must not free the table A holds
    service.cancel(&manager(), other.id).unwrap();
    let table_row = state.store.tables.get(table.id).unwrap();
    assert_eq!(table_row.status, TableStatus::Reserved);
    assert_eq!(table_row.reserved_by, Some(holder.id));
}

#[test]
fn test_cancel_completed_rejected() {
    let state = test_state();
    let table = seed_table(&state, 1, 4);
    let reservation = create_confirmed(&state, table.id, future_date());
    let service = ReservationService::new(&state);

    service.complete(&manager(), reservation.id).unwrap();
    let err = service.cancel(&manager(), reservation.id).unwrap_err();
    assert!(matches!(
        err,
        BookingError::InvalidTransition {
            from: ReservationStatus::Completed,
            to: ReservationStatus::Cancelled
        }
    ));
}

#[test]
fn test_complete_requires_confirmed() {
    let state = test_state();
    let table = seed_table(&state, 1, 4);
    let service = ReservationService::new(&state);

    let pending = service
        .create(&manager(), reservation_payload(table.id, 2, future_date()))
        .unwrap();
    let err = service.complete(&manager(), pending.id).unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition { .. }));
}

#[test]
fn test_complete_releases_linked_table() {
    let state = test_state();
    let table = seed_table(&state, 1, 4);
    let reservation = create_confirmed(&state, table.id, today(state.config.timezone));

    ReservationService::new(&state)
        .complete(&manager(), reservation.id)
        .unwrap();

    let table = state.store.tables.get(table.id).unwrap();
    assert_eq!(table.status, TableStatus::Available);
    assert_eq!(table.reserved_by, None);
}

// ========================================================================
// Update and listings
// ========================================================================

#[test]
fn test_update_recheck_blocks_stealing_slot() {
    let state = test_state();
    let table = seed_table(&state, 1, 4);
    let service = ReservationService::new(&state);

    create_confirmed(&state, table.id, future_date());

    // A pending reservation at another time tries to move onto the held slot
    let mut payload = reservation_payload(table.id, 2, future_date());
    payload.time = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
    let pending = service.create(&manager(), payload).unwrap();

    let err = service
        .update(&manager(), pending.id, ReservationUpdate {
            table_id: None,
            party_size: None,
            date: None,
            time: Some(NaiveTime::from_hms_opt(20, 30, 0).unwrap()),
            notes: None,
        })
        .unwrap_err();
    assert!(matches!(err, BookingError::SlotConflict { .. }));
}

#[test]
fn test_update_rechecks_capacity() {
    let state = test_state();
    let table = seed_table(&state, 1, 2);
    let service = ReservationService::new(&state);

    let reservation = service
        .create(&manager(), reservation_payload(table.id, 2, future_date()))
        .unwrap();
    let err = service
        .update(&manager(), reservation.id, ReservationUpdate {
            table_id: None,
            party_size: Some(5),
            date: None,
            time: None,
            notes: None,
        })
        .unwrap_err();
    assert!(matches!(err, BookingError::CapacityExceeded { .. }));
}

#[test]
fn test_today_lists_only_confirmed() {
    let state = test_state();
    let table_a = seed_table(&state, 1, 4);
    let table_b = seed_table(&state, 2, 4);
    let service = ReservationService::new(&state);

    let confirmed = create_confirmed(&state, table_a.id, today(state.config.timezone));
    service
        .create(
            &manager(),
            reservation_payload(table_b.id, 2, today(state.config.timezone)),
        )
        .unwrap(); // stays pending

    let todays: Vec<i64> = service.today().iter().map(|r| r.id).collect();
    assert_eq!(todays, vec![confirmed.id]);
}
