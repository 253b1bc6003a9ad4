//! Broadcast events - immutable facts published after committed writes
//!
//! Every state mutation publishes one of these on the event bus. Payloads
//! are a closed set of tagged variants, each embedding the full updated
//! entity, so subscribers never have to re-fetch.

use crate::models::{Ingredient, InventoryTransaction, Order, Reservation, Table};
use serde::{Deserialize, Serialize};

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    // ========== Orders ==========
    OrderCreated {
        order: Order,
    },
    OrderUpdated {
        order: Order,
    },
    OrderPaid {
        order: Order,
    },

    // ========== Booking ==========
    ReservationCreated {
        reservation: Reservation,
    },
    ReservationUpdated {
        reservation: Reservation,
    },
    TableUpdated {
        table: Table,
    },

    // ========== Inventory ==========
    StockAdjusted {
        ingredient: Ingredient,
        transaction: InventoryTransaction,
    },
    /// Emitted when an adjustment crosses into low stock.
    /// Extension point: no automatic reorder is taken.
    LowStock {
        ingredient: Ingredient,
    },
}

impl EventPayload {
    /// Dotted event kind, stable across releases
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrderCreated { .. } => "order.create",
            Self::OrderUpdated { .. } => "order.update",
            Self::OrderPaid { .. } => "order.paid",
            Self::ReservationCreated { .. } => "reservation.create",
            Self::ReservationUpdated { .. } => "reservation.update",
            Self::TableUpdated { .. } => "table.update",
            Self::StockAdjusted { .. } => "inventory.adjust",
            Self::LowStock { .. } => "inventory.low_stock",
        }
    }
}

/// Broadcast event envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusEvent {
    /// Event unique ID
    pub event_id: String,
    /// Dotted event kind (`order.update`, `inventory.low_stock`, ...)
    pub kind: String,
    /// Per-resource monotonic version, for subscribers to order updates
    pub version: u64,
    /// Server timestamp (Unix milliseconds)
    pub timestamp: i64,
    pub payload: EventPayload,
}

impl BusEvent {
    /// Create a new event; the kind is derived from the payload
    pub fn new(version: u64, payload: EventPayload) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            kind: payload.kind().to_string(),
            version,
            timestamp: chrono::Utc::now().timestamp_millis(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderPriority, OrderStatus};

    fn sample_order() -> Order {
        Order {
            id: 1,
            table_id: Some(3),
            waiter_id: 10,
            waiter_name: "Marta".to_string(),
            chef_id: None,
            chef_name: None,
            status: OrderStatus::Pending,
            priority: OrderPriority::Normal,
            items: vec![],
            special_instructions: None,
            is_paid: false,
            payment: None,
            total_amount: 0.0,
            created_at: 0,
            updated_at: 0,
            started_preparing_at: None,
            completed_at: None,
            estimated_preparation_minutes: None,
            actual_preparation_minutes: None,
        }
    }

    #[test]
    fn test_kind_derivation() {
        let payload = EventPayload::OrderCreated {
            order: sample_order(),
        };
        assert_eq!(payload.kind(), "order.create");

        let event = BusEvent::new(1, payload);
        assert_eq!(event.kind, "order.create");
        assert_eq!(event.version, 1);
    }

    #[test]
    fn test_payload_is_tagged() {
        let event = BusEvent::new(
            7,
            EventPayload::OrderUpdated {
                order: sample_order(),
            },
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "order.update");
        assert_eq!(json["payload"]["type"], "ORDER_UPDATED");
        assert_eq!(json["payload"]["order"]["id"], 1);
    }
}
