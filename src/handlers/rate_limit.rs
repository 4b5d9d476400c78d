use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};
use std::sync::Arc;

use super::enforce_rate_limit;
use crate::error::AppError;
use crate::metrics::REQUEST_TOTAL;
use crate::models::RateLimitQuery;
use crate::rate_limit::{RateLimitDecision, preset};
use crate::state::AppState;

// Consume one request from a named rule, for callers that gate their own work
pub async fn consume_handler(
    State(state): State<Arc<AppState>>,
    Path(action): Path<String>,
    Query(query): Query<RateLimitQuery>,
    headers: HeaderMap,
) -> Result<Json<RateLimitDecision>, AppError> {
    REQUEST_TOTAL.inc();

    let rule = preset(&action).ok_or_else(|| AppError::NotFound(format!("Rate limit rule {action}")))?;
    let key = match query.subject {
        Some(subject) if !subject.is_empty() => format!("{action}:{subject}"),
        _ => action,
    };

    let decision = enforce_rate_limit(
        &state,
        &headers,
        &key,
        rule,
        "Too many requests. Try again later.",
    )?;
    Ok(Json(decision))
}
