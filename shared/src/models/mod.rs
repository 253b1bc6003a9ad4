//! Entity models and request payloads
//!
//! Entities are the persisted shapes; the `*Create` / `*Update` structs are
//! the inbound payloads accepted by the API layer.

pub mod ingredient;
pub mod menu_item;
pub mod operator;
pub mod order;
pub mod reservation;
pub mod table;

pub use ingredient::{
    Ingredient, IngredientCategory, IngredientCreate, InventoryTransaction, StockAdjustment,
    TransactionKind,
};
pub use menu_item::{MenuItem, MenuItemCreate};
pub use operator::{OperatorContext, OperatorRole};
pub use order::{
    BulkStatusOutcome, BulkStatusUpdate, BulkSkip, KitchenSummary, Order, OrderCreate, OrderItem,
    OrderItemInput, OrderPriority, OrderStatus, OrderStatusUpdate, Payment, PaymentMethod,
    PaymentRequest, PriorityCount,
};
pub use reservation::{Reservation, ReservationCreate, ReservationStatus, ReservationUpdate};
pub use table::{Table, TableCreate, TableStatus, TableStatusUpdate};
