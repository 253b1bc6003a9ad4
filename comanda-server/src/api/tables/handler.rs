//! Table API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{OperatorContext, Table, TableCreate, TableStatusUpdate};

use crate::booking::TableService;
use crate::core::AppState;
use crate::utils::AppResult;

/// List all tables
pub async fn list(
    State(state): State<AppState>,
    _ctx: OperatorContext,
) -> AppResult<Json<Vec<Table>>> {
    Ok(Json(TableService::new(&state).list()))
}

/// List available tables
pub async fn available(
    State(state): State<AppState>,
    _ctx: OperatorContext,
) -> AppResult<Json<Vec<Table>>> {
    Ok(Json(TableService::new(&state).available()))
}

/// Register a new table
pub async fn create(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Json(payload): Json<TableCreate>,
) -> AppResult<Json<Table>> {
    let table = TableService::new(&state).create(&ctx, payload)?;
    Ok(Json(table))
}

/// Change a table's status
pub async fn change_status(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Path(id): Path<i64>,
    Json(payload): Json<TableStatusUpdate>,
) -> AppResult<Json<Table>> {
    let table = TableService::new(&state).change_status(&ctx, id, payload.status)?;
    Ok(Json(table))
}
