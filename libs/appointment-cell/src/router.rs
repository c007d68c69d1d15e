// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use shared_state::AppState;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/bookingList", get(handlers::list_bookings).post(handlers::create_booking))
        .route("/bookingList/{id}", get(handlers::get_booking).delete(handlers::delete_booking))
        .route("/booked", get(handlers::check_slot))
        .route("/services", get(handlers::list_services))
        .with_state(state)
}
