//! Order API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/bulk-status", post(handler::bulk_update_status))
        .route("/kitchen/queue", get(handler::kitchen_queue))
        .route("/kitchen/summary", get(handler::kitchen_summary))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", post(handler::update_status))
        .route("/{id}/payment", post(handler::process_payment))
}
