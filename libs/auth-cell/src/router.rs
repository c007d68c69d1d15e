use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_state::AppState;

use crate::handlers;

pub fn auth_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/jwt", post(handlers::issue_token));

    let admin_routes = Router::new()
        .route("/admin", get(handlers::get_admin))
        .layer(middleware::from_fn_with_state(state.clone(), handlers::admin_gate));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
}
