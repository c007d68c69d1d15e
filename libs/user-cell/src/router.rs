use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
    middleware,
};

use shared_state::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn user_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/users", post(handlers::create_user))
        .route("/users/{id}", patch(handlers::promote_user).delete(handlers::delete_user));

    let protected_routes = Router::new()
        .route("/users", get(handlers::list_users))
        .layer(middleware::from_fn_with_state(Arc::clone(&state.config), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
