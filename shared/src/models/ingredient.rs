//! Ingredient and Inventory Models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Ingredient category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngredientCategory {
    Produce,
    Meat,
    Dairy,
    #[default]
    DryGoods,
    Spices,
    Beverages,
}

/// Ingredient entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    /// Current stock level; may go negative after over-usage, which is
    /// surfaced through the low-stock flag rather than clamped away
    pub quantity: f64,
    /// Unit of measure (kg, g, l, ml, pcs, ...)
    pub unit: String,
    pub category: IngredientCategory,
    pub reorder_level: f64,
    pub cost_per_unit: f64,
    /// Unix millis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_restocked_at: Option<i64>,
    /// Unix millis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<i64>,
}

impl Ingredient {
    /// Low stock iff quantity <= reorder_level
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

/// Inventory transaction kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Restock,
    Usage,
    Adjustment,
}

/// Immutable stock movement record, appended on every quantity change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub id: i64,
    pub ingredient_id: i64,
    /// Signed delta: negative for usage, positive for restock
    pub delta: f64,
    pub kind: TransactionKind,
    /// Unix millis
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Register ingredient payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngredientCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[validate(length(min = 1, max = 20))]
    pub unit: String,
    #[serde(default)]
    pub category: IngredientCategory,
    #[serde(default = "default_reorder_level")]
    pub reorder_level: f64,
    #[serde(default = "default_cost_per_unit")]
    pub cost_per_unit: f64,
}

fn default_reorder_level() -> f64 {
    10.0
}

fn default_cost_per_unit() -> f64 {
    1.0
}

/// Stock adjustment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustment {
    /// Signed delta applied to the current quantity
    pub delta: f64,
    /// Movement kind; inferred from the delta sign when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
