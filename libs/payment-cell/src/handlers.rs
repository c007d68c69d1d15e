use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use shared_models::error::AppError;
use shared_state::AppState;

use crate::models::{EmailQuery, Payment, PaymentIntentRequest, PaymentIntentResponse, SettlementReceipt};
use crate::services::intent::PaymentIntentService;
use crate::services::settlement::SettlementService;

// ==============================================================================
// SETTLEMENT
// ==============================================================================

#[axum::debug_handler]
pub async fn settle_payment(
    State(state): State<Arc<AppState>>,
    Json(payment): Json<Payment>,
) -> Result<Json<SettlementReceipt>, AppError> {
    let service = SettlementService::new(Arc::clone(&state.store));
    Ok(Json(service.settle(&payment).await?))
}

#[axum::debug_handler]
pub async fn list_payments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let Some(email) = query.email else {
        debug!("Payment list requested without email");
        return Ok(Json(Vec::new()));
    };

    let service = SettlementService::new(Arc::clone(&state.store));
    Ok(Json(service.list_by_email(&email).await?))
}

/// Behind token verification; any valid token may read every payment.
#[axum::debug_handler]
pub async fn list_all_payments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let service = SettlementService::new(Arc::clone(&state.store));
    Ok(Json(service.list_all().await?))
}

// ==============================================================================
// PAYMENT INTENTS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_payment_intent(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    let service = PaymentIntentService::new(Arc::clone(&state.payments));
    let client_secret = service.create_client_secret(request.fees).await?;

    Ok(Json(PaymentIntentResponse { client_secret }))
}
