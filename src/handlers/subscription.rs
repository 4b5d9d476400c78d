use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use crate::error::AppError;
use crate::metrics::REQUEST_TOTAL;
use crate::models::SubscriptionStatusResponse;
use crate::state::AppState;
use crate::subscription::{SubscriptionSnapshot, effective_status, is_active};

pub async fn subscription_status_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubscriptionSnapshot>, JsonRejection>,
) -> Result<Json<SubscriptionStatusResponse>, AppError> {
    REQUEST_TOTAL.inc();

    let Json(snapshot) =
        payload.map_err(|_| AppError::InvalidPayload("Invalid payload".to_string()))?;
    let now = state.clock.now();

    Ok(Json(SubscriptionStatusResponse {
        active: is_active(&snapshot, now),
        effective_status: effective_status(&snapshot, now),
    }))
}
