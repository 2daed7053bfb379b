//! Checkout session delegation endpoint

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::payments::CheckoutSession;
use crate::AppState;

/// POST /api/create-checkout-session request body
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutSessionRequest {
    pub plan_id: String,
}

/// POST /api/create-checkout-session
///
/// Resolves the plan, then delegates session creation to the payment
/// collaborator. Unknown plan → 404; collaborator failure or missing
/// configuration → 502.
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(body): Json<CreateCheckoutSessionRequest>,
) -> ApiResult<Json<CheckoutSession>> {
    let plan = state.registry.get(&body.plan_id)?;

    let session = state
        .checkout
        .create_session(plan.id.as_str(), plan.price_cents)
        .await
        .map_err(|e| ApiError::Checkout(e.to_string()))?;

    Ok(Json(session))
}
