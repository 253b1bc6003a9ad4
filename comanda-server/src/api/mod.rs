//! API routing modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`orders`] - order lifecycle endpoints
//! - [`reservations`] - reservation booking endpoints
//! - [`tables`] - table management endpoints
//! - [`menu_items`] - menu listing and availability
//! - [`ingredients`] - inventory ledger endpoints
//!
//! All routers nest under `/api/...`. Every endpoint except health expects
//! the gateway-injected `X-Operator-*` identity headers.

pub mod health;
pub mod ingredients;
pub mod menu_items;
pub mod orders;
pub mod reservations;
pub mod tables;

// Re-export common types for handlers
pub use shared::{AppError, AppResult};
