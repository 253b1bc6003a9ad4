//! In-process entity store
//!
//! One [`Collection`] per entity kind, each guarded by its own
//! `parking_lot::RwLock`. Service operations that validate-then-write take
//! the write guard for the whole sequence, so concurrent status changes or
//! concurrent reservation confirms for the same slot serialize instead of
//! racing.
//!
//! Lock order (always acquire in this order, release in any):
//! menu_items → tables → reservations → orders → ingredients → transactions.
//! Guards are never held across await points.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use shared::models::{Ingredient, InventoryTransaction, MenuItem, Order, Reservation, Table};

/// A single entity collection with store-assigned sequential ids
#[derive(Debug)]
pub struct Collection<T> {
    next_id: AtomicI64,
    rows: RwLock<BTreeMap<i64, T>>,
}

impl<T: Clone> Collection<T> {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Allocate the next id without inserting
    ///
    /// Used by callers that build the entity inside an already-held write
    /// guard.
    pub fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Allocate an id, build the entity, insert it and return a clone
    pub fn insert_with(&self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id();
        let row = build(id);
        self.rows.write().insert(id, row.clone());
        row
    }

    /// Fetch a clone of one entity
    pub fn get(&self, id: i64) -> Option<T> {
        self.rows.read().get(&id).cloned()
    }

    /// Clones of all entities, ordered by id
    pub fn list(&self) -> Vec<T> {
        self.rows.read().values().cloned().collect()
    }

    /// Mutate one entity in place, returning the updated clone
    pub fn update(&self, id: i64, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut rows = self.rows.write();
        let row = rows.get_mut(&id)?;
        apply(row);
        Some(row.clone())
    }

    /// Read guard over the raw rows
    pub fn read(&self) -> RwLockReadGuard<'_, BTreeMap<i64, T>> {
        self.rows.read()
    }

    /// Write guard over the raw rows; holds the collection's write section
    pub fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<i64, T>> {
        self.rows.write()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl<T: Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The entity store
#[derive(Debug, Default)]
pub struct Store {
    pub menu_items: Collection<MenuItem>,
    pub tables: Collection<Table>,
    pub reservations: Collection<Reservation>,
    pub orders: Collection<Order>,
    pub ingredients: Collection<Ingredient>,
    pub transactions: Collection<InventoryTransaction>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Table, TableStatus};

    fn table(id: i64, number: i32) -> Table {
        Table {
            id,
            number,
            capacity: 4,
            status: TableStatus::Available,
            location: None,
            reserved_by: None,
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let col: Collection<Table> = Collection::new();
        let a = col.insert_with(|id| table(id, 1));
        let b = col.insert_with(|id| table(id, 2));
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(col.len(), 2);
    }

    #[test]
    fn test_update_mutates_in_place() {
        let col: Collection<Table> = Collection::new();
        let t = col.insert_with(|id| table(id, 1));

        let updated = col
            .update(t.id, |row| row.status = TableStatus::Occupied)
            .unwrap();
        assert_eq!(updated.status, TableStatus::Occupied);
        assert_eq!(col.get(t.id).unwrap().status, TableStatus::Occupied);
    }

    #[test]
    fn test_update_missing_returns_none() {
        let col: Collection<Table> = Collection::new();
        assert!(col.update(99, |_| {}).is_none());
    }

    #[test]
    fn test_list_ordered_by_id() {
        let col: Collection<Table> = Collection::new();
        for n in 1..=3 {
            col.insert_with(|id| table(id, n));
        }
        let ids: Vec<i64> = col.list().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
