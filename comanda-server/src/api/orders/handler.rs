//! Order API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{
    BulkStatusOutcome, BulkStatusUpdate, KitchenSummary, OperatorContext, Order, OrderCreate,
    OrderStatus, OrderStatusUpdate, PaymentRequest,
};

use crate::core::AppState;
use crate::orders::{OrderFilter, OrderService};
use crate::utils::AppResult;

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    pub is_paid: Option<bool>,
}

/// Create a new order
pub async fn create(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = OrderService::new(&state).create(&ctx, payload)?;
    Ok(Json(order))
}

/// List orders (waiters see their own)
pub async fn list(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = OrderService::new(&state).list(&ctx, OrderFilter {
        status: query.status,
        is_paid: query.is_paid,
    });
    Ok(Json(orders))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = OrderService::new(&state).get(&ctx, id)?;
    Ok(Json(order))
}

/// Update order status
///
/// Body: `{"status": "PREPARING"}`. Returns the updated order, or the
/// transition error with the order left unchanged.
pub async fn update_status(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = OrderService::new(&state).update_status(&ctx, id, payload.status)?;
    Ok(Json(order))
}

/// Process payment for an order
pub async fn process_payment(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentRequest>,
) -> AppResult<Json<Order>> {
    let order = OrderService::new(&state).process_payment(&ctx, id, payload)?;
    Ok(Json(order))
}

/// Apply one status to many orders; invalid transitions are reported
/// per-order instead of failing the batch
pub async fn bulk_update_status(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Json(payload): Json<BulkStatusUpdate>,
) -> AppResult<Json<BulkStatusOutcome>> {
    let outcome = OrderService::new(&state).bulk_update_status(&ctx, payload);
    Ok(Json(outcome))
}

/// Kitchen queue: open orders, most urgent first
pub async fn kitchen_queue(
    State(state): State<AppState>,
    _ctx: OperatorContext,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(OrderService::new(&state).kitchen_queue()))
}

/// Kitchen dashboard summary
pub async fn kitchen_summary(
    State(state): State<AppState>,
    _ctx: OperatorContext,
) -> AppResult<Json<KitchenSummary>> {
    Ok(Json(OrderService::new(&state).kitchen_summary()))
}
