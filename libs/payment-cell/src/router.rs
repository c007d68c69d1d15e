use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_state::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn payment_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/payments", get(handlers::list_payments).post(handlers::settle_payment))
        .route("/create-payment-intent", post(handlers::create_payment_intent));

    let protected_routes = Router::new()
        .route("/allPayments", get(handlers::list_all_payments))
        .layer(middleware::from_fn_with_state(Arc::clone(&state.config), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
