//! Menu Item API handlers
//!
//! Minimal surface: the menu exists to price order lines. Items are listed,
//! registered and flipped available/unavailable; everything else about the
//! catalog lives outside this service.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{MenuItem, MenuItemCreate, OperatorContext};
use shared::{AppError, ErrorCode};

use crate::core::AppState;
use crate::utils::AppResult;
use crate::utils::validation::validate_payload;

/// Query params for listing menu items
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub is_available: Option<bool>,
}

/// List menu items with optional filtering
pub async fn list(
    State(state): State<AppState>,
    _ctx: OperatorContext,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let search = query.search.map(|s| s.to_lowercase());
    let items = state
        .store
        .menu_items
        .list()
        .into_iter()
        .filter(|item| {
            query
                .category
                .as_ref()
                .is_none_or(|c| item.category.eq_ignore_ascii_case(c))
        })
        .filter(|item| query.is_available.is_none_or(|a| item.is_available == a))
        .filter(|item| {
            search.as_ref().is_none_or(|s| {
                item.name.to_lowercase().contains(s)
                    || item.description.to_lowercase().contains(s)
                    || item.category.to_lowercase().contains(s)
            })
        })
        .collect();
    Ok(Json(items))
}

/// Register a menu item
pub async fn create(
    State(state): State<AppState>,
    _ctx: OperatorContext,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_payload(&payload)?;

    let item = state.store.menu_items.insert_with(|id| MenuItem {
        id,
        name: payload.name.clone(),
        description: payload.description.clone(),
        category: payload.category.clone(),
        price: payload.price,
        is_available: payload.is_available,
        preparation_minutes: payload.preparation_minutes,
    });
    tracing::info!(menu_item_id = item.id, name = %item.name, "Menu item created");
    Ok(Json(item))
}

/// Flip a menu item's availability
pub async fn toggle_availability(
    State(state): State<AppState>,
    _ctx: OperatorContext,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = state
        .store
        .menu_items
        .update(id, |item| item.is_available = !item.is_available)
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::MenuItemNotFound,
                format!("Menu item {} not found", id),
            )
        })?;
    Ok(Json(item))
}
