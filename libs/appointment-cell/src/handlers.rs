// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use shared_database::{DeleteResult, InsertOneResult};
use shared_models::error::AppError;
use shared_state::AppState;

use crate::models::{AvailabilityResponse, Booking, EmailQuery, ServiceEntry, Slot, SlotQuery};
use crate::services::availability::SlotAvailabilityService;
use crate::services::booking::BookingService;
use crate::services::catalog::CatalogService;

// ==============================================================================
// BOOKINGS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let Some(email) = query.email else {
        debug!("Booking list requested without email");
        return Ok(Json(Vec::new()));
    };

    let service = BookingService::new(Arc::clone(&state.store));
    Ok(Json(service.list_by_requester(&email).await?))
}

/// Responds with `null` when the booking does not exist.
#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<Json<Option<Booking>>, AppError> {
    let service = BookingService::new(Arc::clone(&state.store));
    Ok(Json(service.get_booking(&booking_id).await?))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(booking): Json<Booking>,
) -> Result<Json<InsertOneResult>, AppError> {
    let service = BookingService::new(Arc::clone(&state.store));
    Ok(Json(service.create_booking(&booking).await?))
}

#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<Json<DeleteResult>, AppError> {
    let service = BookingService::new(Arc::clone(&state.store));
    Ok(Json(service.delete_booking(&booking_id).await?))
}

// ==============================================================================
// SLOTS AND CATALOG
// ==============================================================================

#[axum::debug_handler]
pub async fn check_slot(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let checker = SlotAvailabilityService::new(Arc::clone(&state.store));
    let available = checker.is_available(&Slot::from(query)).await?;

    Ok(Json(AvailabilityResponse { message: available }))
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ServiceEntry>>, AppError> {
    let catalog = CatalogService::new(Arc::clone(&state.store));
    Ok(Json(catalog.list_services().await?))
}
