//! Menu Item Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu item entity
///
/// The price here is the source for order line snapshots; changing it later
/// never retroactively changes existing orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Price in currency unit
    pub price: f64,
    pub is_available: bool,
    /// Typical preparation time in minutes
    pub preparation_minutes: i32,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[validate(range(min = 1))]
    #[serde(default = "default_preparation_minutes")]
    pub preparation_minutes: i32,
}

fn default_available() -> bool {
    true
}

fn default_preparation_minutes() -> i32 {
    10
}
