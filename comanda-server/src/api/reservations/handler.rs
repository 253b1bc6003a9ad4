//! Reservation API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{OperatorContext, Reservation, ReservationCreate, ReservationUpdate};

use crate::booking::ReservationService;
use crate::core::AppState;
use crate::utils::AppResult;

/// Create a reservation (capacity and slot checks apply)
pub async fn create(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    let reservation = ReservationService::new(&state).create(&ctx, payload)?;
    Ok(Json(reservation))
}

/// Upcoming reservations
pub async fn list(
    State(state): State<AppState>,
    _ctx: OperatorContext,
) -> AppResult<Json<Vec<Reservation>>> {
    Ok(Json(ReservationService::new(&state).list()))
}

/// Get reservation by id
pub async fn get_by_id(
    State(state): State<AppState>,
    _ctx: OperatorContext,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = ReservationService::new(&state).get(id)?;
    Ok(Json(reservation))
}

/// Update a reservation; capacity and slot checks re-run
pub async fn update(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    let reservation = ReservationService::new(&state).update(&ctx, id, payload)?;
    Ok(Json(reservation))
}

/// Confirm a pending reservation
pub async fn confirm(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = ReservationService::new(&state).confirm(&ctx, id)?;
    Ok(Json(reservation))
}

/// Cancel a reservation
pub async fn cancel(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = ReservationService::new(&state).cancel(&ctx, id)?;
    Ok(Json(reservation))
}

/// Complete a confirmed reservation (guests seated)
pub async fn complete(
    State(state): State<AppState>,
    ctx: OperatorContext,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = ReservationService::new(&state).complete(&ctx, id)?;
    Ok(Json(reservation))
}

/// Today's confirmed reservations
pub async fn today(
    State(state): State<AppState>,
    _ctx: OperatorContext,
) -> AppResult<Json<Vec<Reservation>>> {
    Ok(Json(ReservationService::new(&state).today()))
}
