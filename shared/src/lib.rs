//! Shared types for the Comanda backend
//!
//! Common types used across crates: error codes and API envelopes,
//! entity models, request payloads, and the broadcast event types.

pub mod error;
pub mod event;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use event::{BusEvent, EventPayload};
