use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
    middleware,
};

use shared_state::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/doctorList", post(handlers::create_doctor))
        .route("/doctorList/{id}", delete(handlers::delete_doctor))
        .route("/doctorDetails/{id}", get(handlers::get_doctor_details));

    // Self-service listing: token required, and it must match `uid`
    let protected_routes = Router::new()
        .route("/doctorList", get(handlers::list_doctors))
        .layer(middleware::from_fn_with_state(Arc::clone(&state.config), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
