//! Ingredient API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/ingredients", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::register))
        .route("/low-stock", get(handler::low_stock))
        .route("/{id}/stock", post(handler::adjust_stock))
        .route("/{id}/transactions", get(handler::transactions))
}
