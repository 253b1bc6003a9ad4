//! Dining Table Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Table status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,
    /// Display number, unique across the restaurant
    pub number: i32,
    pub capacity: i32,
    pub status: TableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Reservation that put this table into RESERVED status.
    /// Only the linked reservation releases the table on cancel/complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_by: Option<i64>,
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TableCreate {
    #[validate(range(min = 1))]
    pub number: i32,
    #[validate(range(min = 1))]
    pub capacity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Change table status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatusUpdate {
    pub status: TableStatus,
}
