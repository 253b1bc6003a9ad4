//! Order Model
//!
//! The order aggregate: line items, payment, timing fields and the status
//! state machine. Transition side effects (chef assignment, timestamps,
//! table release) are applied by the order service; the allowed edges are
//! defined here so every caller shares one transition table.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Order status
///
/// Allowed edges:
///
/// ```text
/// PENDING ──▶ PREPARING ──▶ READY ──▶ SERVED
///    │            │           │
///    └────────────┴───────────┴─────▶ CANCELLED
/// ```
///
/// SERVED and CANCELLED are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    /// Statuses reachable from this one
    pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
        match self {
            Self::Pending => &[Self::Preparing, Self::Cancelled],
            Self::Preparing => &[Self::Ready, Self::Cancelled],
            Self::Ready => &[Self::Served, Self::Cancelled],
            Self::Served | Self::Cancelled => &[],
        }
    }

    /// Whether `target` is a legal next status
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Terminal statuses have no further outgoing transitions
    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Wire name, as serialized in requests and events
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Served => "SERVED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order priority
///
/// Ordered: LOW < NORMAL < HIGH < URGENT, so queues can sort on it.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl OrderPriority {
    /// Priority derived from how long an order has been waiting
    pub fn for_wait_minutes(minutes: i64) -> Self {
        if minutes > 45 {
            Self::Urgent
        } else if minutes > 30 {
            Self::High
        } else if minutes > 15 {
            Self::Normal
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

/// Order line item
///
/// Name and price are snapshotted at creation; later menu edits never
/// change an existing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_item_id: Option<i64>,
    pub name: String,
    /// Price per unit in currency unit
    pub price: f64,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
}

/// Payment record (one per order)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub method: PaymentMethod,
    /// Amount in currency unit, always equal to the order total
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Unix millis
    pub paid_at: i64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    pub waiter_id: i64,
    pub waiter_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chef_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chef_name: Option<String>,
    pub status: OrderStatus,
    pub priority: OrderPriority,
    pub items: Vec<OrderItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    pub is_paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
    /// Total amount in currency unit
    pub total_amount: f64,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
    /// Unix millis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_preparing_at: Option<i64>,
    /// Unix millis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_preparation_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_preparation_minutes: Option<i32>,
}

/// Order line item input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_item_id: Option<i64>,
    /// Display name; defaults to the menu item name when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Price per unit; defaults to the current menu item price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    #[validate(nested)]
    pub items: Vec<OrderItemInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    /// Explicit total override; a non-zero value wins over the computed sum
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<OrderPriority>,
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Bulk status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkStatusUpdate {
    pub order_ids: Vec<i64>,
    pub status: OrderStatus,
}

/// One rejected order in a bulk update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSkip {
    pub order_id: i64,
    pub reason: String,
}

/// Bulk status update outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkStatusOutcome {
    pub updated: Vec<i64>,
    pub skipped: Vec<BulkSkip>,
}

/// Process payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Per-priority open-order count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityCount {
    pub priority: OrderPriority,
    pub count: usize,
}

/// Kitchen dashboard summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenSummary {
    pub total_pending: usize,
    pub total_preparing: usize,
    /// Average actual preparation minutes over served orders
    pub avg_preparation_minutes: f64,
    pub orders_by_priority: Vec<PriorityCount>,
}
