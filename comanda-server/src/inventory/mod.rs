//! Inventory ledger
//!
//! Ingredient stock tracking: signed quantity deltas, an append-only
//! transaction record per change, and low-stock detection.

mod ledger;

pub use ledger::{LedgerError, LedgerResult, LedgerService};
