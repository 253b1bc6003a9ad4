//! Ingredient API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use shared::models::{
    Ingredient, IngredientCreate, InventoryTransaction, OperatorContext, StockAdjustment,
};

use crate::core::AppState;
use crate::inventory::LedgerService;
use crate::utils::AppResult;

/// Low-stock listing response
#[derive(Debug, Serialize)]
pub struct LowStockResponse {
    pub low_stock_ingredients: Vec<Ingredient>,
    pub total_low_stock: usize,
}

/// Register a new ingredient
pub async fn register(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Json(payload): Json<IngredientCreate>,
) -> AppResult<Json<Ingredient>> {
    let ingredient = LedgerService::new(&state).register(&ctx, payload)?;
    Ok(Json(ingredient))
}

/// List all ingredients
pub async fn list(
    State(state): State<AppState>,
    _ctx: OperatorContext,
) -> AppResult<Json<Vec<Ingredient>>> {
    Ok(Json(LedgerService::new(&state).list()))
}

/// Ingredients at or below their reorder level
pub async fn low_stock(
    State(state): State<AppState>,
    _ctx: OperatorContext,
) -> AppResult<Json<LowStockResponse>> {
    let low_stock_ingredients = LedgerService::new(&state).low_stock();
    let total_low_stock = low_stock_ingredients.len();
    Ok(Json(LowStockResponse {
        low_stock_ingredients,
        total_low_stock,
    }))
}

/// Apply a signed stock delta
pub async fn adjust_stock(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Path(id): Path<i64>,
    Json(payload): Json<StockAdjustment>,
) -> AppResult<Json<Ingredient>> {
    let ingredient = LedgerService::new(&state).adjust(&ctx, id, payload)?;
    Ok(Json(ingredient))
}

/// Movement history for one ingredient, newest first
pub async fn transactions(
    State(state): State<AppState>,
    _ctx: OperatorContext,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<InventoryTransaction>>> {
    let transactions = LedgerService::new(&state).transactions(id)?;
    Ok(Json(transactions))
}
