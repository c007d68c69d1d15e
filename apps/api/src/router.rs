use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use auth_cell::router::auth_routes;
use doctor_cell::router::doctor_routes;
use payment_cell::router::payment_routes;
use shared_state::AppState;
use user_cell::router::user_routes;

pub const BANNER: &str = "Doc House is running";

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { BANNER }))
        .merge(auth_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(payment_routes(state.clone()))
        .merge(user_routes(state.clone()))
        .merge(doctor_routes(state))
}
