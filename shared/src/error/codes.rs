//! Unified error codes for the Comanda backend
//!
//! Error codes are organized by domain range:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Catalog / inventory errors
//! - 7xxx: Table / reservation errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with API consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Illegal state transition (orders, reservations)
    InvalidTransition = 10,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has already been paid
    OrderAlreadyPaid = 4002,
    /// Order has no items
    OrderEmpty = 4003,
    /// Order line item is invalid
    OrderItemInvalid = 4004,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Invalid payment method
    PaymentInvalidMethod = 5002,

    // ==================== 6xxx: Catalog / Inventory ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Ingredient not found
    IngredientNotFound = 6101,
    /// Stock adjustment is invalid (zero delta, non-finite amount)
    StockAdjustmentInvalid = 6102,

    // ==================== 7xxx: Table / Reservation ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table number already exists
    TableNumberExists = 7002,
    /// Reservation not found
    ReservationNotFound = 7101,
    /// Party size exceeds table capacity
    CapacityExceeded = 7102,
    /// Another confirmed reservation holds the same slot
    SlotConflict = 7103,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",
            Self::InvalidTransition => "Illegal status transition",
            Self::NotAuthenticated => "Not authenticated",
            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "Role required",
            Self::OrderNotFound => "Order not found",
            Self::OrderAlreadyPaid => "Order is already paid",
            Self::OrderEmpty => "Order has no items",
            Self::OrderItemInvalid => "Order item is invalid",
            Self::PaymentFailed => "Payment processing failed",
            Self::PaymentInvalidMethod => "Invalid payment method",
            Self::MenuItemNotFound => "Menu item not found",
            Self::IngredientNotFound => "Ingredient not found",
            Self::StockAdjustmentInvalid => "Stock adjustment is invalid",
            Self::TableNotFound => "Table not found",
            Self::TableNumberExists => "Table number already exists",
            Self::ReservationNotFound => "Reservation not found",
            Self::CapacityExceeded => "Party size exceeds table capacity",
            Self::SlotConflict => "Table is already reserved for this slot",
            Self::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            6 => Ok(Self::InvalidFormat),
            7 => Ok(Self::RequiredField),
            8 => Ok(Self::ValueOutOfRange),
            10 => Ok(Self::InvalidTransition),
            1001 => Ok(Self::NotAuthenticated),
            2001 => Ok(Self::PermissionDenied),
            2002 => Ok(Self::RoleRequired),
            4001 => Ok(Self::OrderNotFound),
            4002 => Ok(Self::OrderAlreadyPaid),
            4003 => Ok(Self::OrderEmpty),
            4004 => Ok(Self::OrderItemInvalid),
            5001 => Ok(Self::PaymentFailed),
            5002 => Ok(Self::PaymentInvalidMethod),
            6001 => Ok(Self::MenuItemNotFound),
            6101 => Ok(Self::IngredientNotFound),
            6102 => Ok(Self::StockAdjustmentInvalid),
            7001 => Ok(Self::TableNotFound),
            7002 => Ok(Self::TableNumberExists),
            7101 => Ok(Self::ReservationNotFound),
            7102 => Ok(Self::CapacityExceeded),
            7103 => Ok(Self::SlotConflict),
            9001 => Ok(Self::InternalError),
            other => Err(format!("Unknown error code: {}", other)),
        }
    }
}
