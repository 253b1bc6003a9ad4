//! Entity store
//!
//! Persistence is an external collaborator for this backend; the store is
//! the in-process stand-in that owns the entity collections and provides
//! the write sections services run their validate+write sequences in.

mod store;

pub use store::{Collection, Store};
