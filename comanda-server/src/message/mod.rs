//! Event broadcast
//!
//! The outbound notification collaborator: entity-change events published
//! by the services, fanned out to all subscribers of a shared channel.

mod bus;

pub use bus::EventBus;
