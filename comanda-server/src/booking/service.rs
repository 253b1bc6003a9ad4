//! Table and reservation services
//!
//! Confirm/cancel flows run inside the store's write section (tables before
//! reservations, per the store lock order) so two concurrent confirms of
//! the same slot serialize and the second one sees the first one's write.

use std::collections::BTreeMap;

use shared::event::EventPayload;
use shared::models::{
    OperatorContext, Reservation, ReservationCreate, ReservationStatus, ReservationUpdate, Table,
    TableCreate, TableStatus,
};

use crate::core::AppState;
use crate::utils::time::{now_millis, today};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_payload};

use super::conflict::{check_capacity, check_slot};
use super::error::{BookingError, BookingResult};

/// Table service
pub struct TableService<'a> {
    state: &'a AppState,
}

impl<'a> TableService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Register a new table; numbers are unique
    pub fn create(&self, ctx: &OperatorContext, payload: TableCreate) -> BookingResult<Table> {
        validate_payload(&payload)?;

        let table = {
            let mut tables = self.state.store.tables.write();
            if tables.values().any(|t| t.number == payload.number) {
                return Err(BookingError::TableNumberExists(payload.number));
            }
            let id = self.state.store.tables.next_id();
            let table = Table {
                id,
                number: payload.number,
                capacity: payload.capacity,
                status: TableStatus::Available,
                location: payload.location,
                reserved_by: None,
            };
            tables.insert(id, table.clone());
            table
        };

        tracing::info!(
            table_id = table.id,
            number = table.number,
            operator_id = ctx.operator_id,
            "Table created"
        );
        self.state.publish(
            "table",
            EventPayload::TableUpdated {
                table: table.clone(),
            },
        );
        Ok(table)
    }

    pub fn list(&self) -> Vec<Table> {
        self.state.store.tables.list()
    }

    pub fn available(&self) -> Vec<Table> {
        self.state
            .store
            .tables
            .list()
            .into_iter()
            .filter(|t| t.status == TableStatus::Available)
            .collect()
    }

    /// Change a table's status directly (maintenance, manual overrides)
    ///
    /// Leaving RESERVED by hand also clears the reservation linkage.
    pub fn change_status(
        &self,
        ctx: &OperatorContext,
        id: i64,
        status: TableStatus,
    ) -> BookingResult<Table> {
        let table = self
            .state
            .store
            .tables
            .update(id, |table| {
                table.status = status;
                if status != TableStatus::Reserved {
                    table.reserved_by = None;
                }
            })
            .ok_or(BookingError::TableNotFound(id))?;

        tracing::info!(
            table_id = id,
            status = ?status,
            operator_id = ctx.operator_id,
            "Table status changed"
        );
        self.state.publish(
            "table",
            EventPayload::TableUpdated {
                table: table.clone(),
            },
        );
        Ok(table)
    }
}

/// Reservation service
pub struct ReservationService<'a> {
    state: &'a AppState,
}

impl<'a> ReservationService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a reservation (starts PENDING)
    ///
    /// Capacity and slot checks run before the insert; only a CONFIRMED
    /// reservation on the same slot blocks creation.
    pub fn create(
        &self,
        ctx: &OperatorContext,
        payload: ReservationCreate,
    ) -> BookingResult<Reservation> {
        validate_payload(&payload)?;
        validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

        let reservation = {
            let tables = self.state.store.tables.read();
            let mut reservations = self.state.store.reservations.write();

            let table = tables
                .get(&payload.table_id)
                .ok_or(BookingError::TableNotFound(payload.table_id))?;
            check_capacity(table, payload.party_size)?;
            check_slot(
                reservations.values(),
                payload.table_id,
                payload.date,
                payload.time,
                None,
            )?;

            let id = self.state.store.reservations.next_id();
            let reservation = Reservation {
                id,
                table_id: payload.table_id,
                customer_name: payload.customer_name,
                customer_phone: payload.customer_phone,
                party_size: payload.party_size,
                date: payload.date,
                time: payload.time,
                status: ReservationStatus::Pending,
                created_at: now_millis(),
                notes: payload.notes,
            };
            reservations.insert(id, reservation.clone());
            reservation
        };

        tracing::info!(
            reservation_id = reservation.id,
            table_id = reservation.table_id,
            date = %reservation.date,
            operator_id = ctx.operator_id,
            "Reservation created"
        );
        self.state.publish(
            "reservation",
            EventPayload::ReservationCreated {
                reservation: reservation.clone(),
            },
        );
        Ok(reservation)
    }

    /// Update a reservation, re-running capacity and slot checks
    pub fn update(
        &self,
        ctx: &OperatorContext,
        id: i64,
        payload: ReservationUpdate,
    ) -> BookingResult<Reservation> {
        validate_payload(&payload)?;
        validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

        let reservation = {
            let tables = self.state.store.tables.read();
            let mut reservations = self.state.store.reservations.write();

            let existing = reservations
                .get(&id)
                .ok_or(BookingError::ReservationNotFound(id))?;

            let table_id = payload.table_id.unwrap_or(existing.table_id);
            let party_size = payload.party_size.unwrap_or(existing.party_size);
            let date = payload.date.unwrap_or(existing.date);
            let time = payload.time.unwrap_or(existing.time);

            let table = tables
                .get(&table_id)
                .ok_or(BookingError::TableNotFound(table_id))?;
            check_capacity(table, party_size)?;
            check_slot(reservations.values(), table_id, date, time, Some(id))?;

            let entry = reservations
                .get_mut(&id)
                .ok_or(BookingError::ReservationNotFound(id))?;
            entry.table_id = table_id;
            entry.party_size = party_size;
            entry.date = date;
            entry.time = time;
            if let Some(notes) = payload.notes {
                entry.notes = Some(notes);
            }
            entry.clone()
        };

        tracing::info!(
            reservation_id = id,
            operator_id = ctx.operator_id,
            "Reservation updated"
        );
        self.state.publish(
            "reservation",
            EventPayload::ReservationUpdated {
                reservation: reservation.clone(),
            },
        );
        Ok(reservation)
    }

    /// Confirm a pending reservation
    ///
    /// Only PENDING → CONFIRMED is legal; the slot check re-runs inside the
    /// write section so two confirms for the same slot cannot both pass.
    /// Confirming for today's date puts the table into RESERVED and links it
    /// to this reservation.
    pub fn confirm(&self, ctx: &OperatorContext, id: i64) -> BookingResult<Reservation> {
        let (reservation, table_event) = {
            let mut tables = self.state.store.tables.write();
            let mut reservations = self.state.store.reservations.write();

            let existing = reservations
                .get(&id)
                .ok_or(BookingError::ReservationNotFound(id))?;
            if existing.status != ReservationStatus::Pending {
                return Err(BookingError::InvalidTransition {
                    from: existing.status,
                    to: ReservationStatus::Confirmed,
                });
            }
            let (table_id, date, time) = (existing.table_id, existing.date, existing.time);

            check_slot(reservations.values(), table_id, date, time, Some(id))?;

            let entry = reservations
                .get_mut(&id)
                .ok_or(BookingError::ReservationNotFound(id))?;
            entry.status = ReservationStatus::Confirmed;
            let reservation = entry.clone();

            // Same-day confirmation holds the physical table right away
            let mut table_event = None;
            if date == today(self.state.config.timezone)
                && let Some(table) = tables.get_mut(&table_id)
            {
                table.status = TableStatus::Reserved;
                table.reserved_by = Some(id);
                table_event = Some(table.clone());
            }
            (reservation, table_event)
        };

        tracing::info!(
            reservation_id = id,
            table_id = reservation.table_id,
            operator_id = ctx.operator_id,
            "Reservation confirmed"
        );
        if let Some(table) = table_event {
            self.state
                .publish("table", EventPayload::TableUpdated { table });
        }
        self.state.publish(
            "reservation",
            EventPayload::ReservationUpdated {
                reservation: reservation.clone(),
            },
        );
        Ok(reservation)
    }

    /// Cancel a reservation
    ///
    /// COMPLETED reservations cannot be cancelled. The table is released
    /// only when this reservation is the one holding it.
    pub fn cancel(&self, ctx: &OperatorContext, id: i64) -> BookingResult<Reservation> {
        let (reservation, table_event) = {
            let mut tables = self.state.store.tables.write();
            let mut reservations = self.state.store.reservations.write();

            let entry = reservations
                .get_mut(&id)
                .ok_or(BookingError::ReservationNotFound(id))?;
            if entry.status == ReservationStatus::Completed {
                return Err(BookingError::InvalidTransition {
                    from: entry.status,
                    to: ReservationStatus::Cancelled,
                });
            }
            entry.status = ReservationStatus::Cancelled;
            let reservation = entry.clone();
            let table_event = release_linked_table(&mut tables, &reservation);
            (reservation, table_event)
        };

        tracing::info!(
            reservation_id = id,
            operator_id = ctx.operator_id,
            "Reservation cancelled"
        );
        if let Some(table) = table_event {
            self.state
                .publish("table", EventPayload::TableUpdated { table });
        }
        self.state.publish(
            "reservation",
            EventPayload::ReservationUpdated {
                reservation: reservation.clone(),
            },
        );
        Ok(reservation)
    }

    /// Mark a confirmed reservation as completed (guests seated)
    pub fn complete(&self, ctx: &OperatorContext, id: i64) -> BookingResult<Reservation> {
        let (reservation, table_event) = {
            let mut tables = self.state.store.tables.write();
            let mut reservations = self.state.store.reservations.write();

            let entry = reservations
                .get_mut(&id)
                .ok_or(BookingError::ReservationNotFound(id))?;
            if entry.status != ReservationStatus::Confirmed {
                return Err(BookingError::InvalidTransition {
                    from: entry.status,
                    to: ReservationStatus::Completed,
                });
            }
            entry.status = ReservationStatus::Completed;
            let reservation = entry.clone();
            let table_event = release_linked_table(&mut tables, &reservation);
            (reservation, table_event)
        };

        tracing::info!(
            reservation_id = id,
            operator_id = ctx.operator_id,
            "Reservation completed"
        );
        if let Some(table) = table_event {
            self.state
                .publish("table", EventPayload::TableUpdated { table });
        }
        self.state.publish(
            "reservation",
            EventPayload::ReservationUpdated {
                reservation: reservation.clone(),
            },
        );
        Ok(reservation)
    }

    /// Upcoming reservations (today or later), ordered by date and time
    pub fn list(&self) -> Vec<Reservation> {
        let today = today(self.state.config.timezone);
        let mut reservations: Vec<Reservation> = self
            .state
            .store
            .reservations
            .list()
            .into_iter()
            .filter(|r| r.date >= today)
            .collect();
        reservations.sort_by(|a, b| a.date.cmp(&b.date).then(a.time.cmp(&b.time)));
        reservations
    }

    /// Today's confirmed reservations
    pub fn today(&self) -> Vec<Reservation> {
        let today = today(self.state.config.timezone);
        self.state
            .store
            .reservations
            .list()
            .into_iter()
            .filter(|r| r.date == today && r.status == ReservationStatus::Confirmed)
            .collect()
    }

    /// Fetch one reservation
    pub fn get(&self, id: i64) -> BookingResult<Reservation> {
        self.state
            .store
            .reservations
            .get(id)
            .ok_or(BookingError::ReservationNotFound(id))
    }
}

/// Free the table held by this reservation, if it is the one holding it
///
/// Linking through `reserved_by` keeps a cancellation of reservation B from
/// freeing a table that reservation A confirmed.
fn release_linked_table(
    tables: &mut BTreeMap<i64, Table>,
    reservation: &Reservation,
) -> Option<Table> {
    let table = tables.get_mut(&reservation.table_id)?;
    if table.reserved_by != Some(reservation.id) {
        return None;
    }
    table.status = TableStatus::Available;
    table.reserved_by = None;
    Some(table.clone())
}
