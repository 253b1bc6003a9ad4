//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic goes through `Decimal` internally, then converts
//! back to `f64` for storage and serialization, rounded to 2 decimal places
//! half-up.

use rust_decimal::prelude::*;
use shared::models::OrderItem;

use super::error::OrderError;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per line item
const MAX_PRICE: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate a resolved price before it is snapshotted onto a line item
pub fn validate_price(price: f64) -> Result<(), OrderError> {
    if !price.is_finite() {
        return Err(OrderError::InvalidItem(format!(
            "price must be a finite number, got {}",
            price
        )));
    }
    if price < 0.0 {
        return Err(OrderError::InvalidItem(format!(
            "price must be non-negative, got {}",
            price
        )));
    }
    if price > MAX_PRICE {
        return Err(OrderError::InvalidItem(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, price
        )));
    }
    Ok(())
}

/// Line total: price × quantity
pub fn line_total(item: &OrderItem) -> Decimal {
    to_decimal(item.price) * Decimal::from(item.quantity)
}

/// Order total: Σ price × quantity over all line items
pub fn order_total(items: &[OrderItem]) -> f64 {
    let total: Decimal = items.iter().map(line_total).sum();
    to_f64(total)
}
