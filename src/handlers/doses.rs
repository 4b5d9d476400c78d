use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;
use tracing::debug;

use crate::doses::{due_today, today_index};
use crate::error::AppError;
use crate::metrics::REQUEST_TOTAL;
use crate::models::{DosesTodayRequest, DosesTodayResponse};
use crate::state::AppState;

pub async fn doses_today_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DosesTodayRequest>, JsonRejection>,
) -> Result<Json<DosesTodayResponse>, AppError> {
    REQUEST_TOTAL.inc();

    let Json(request) =
        payload.map_err(|_| AppError::InvalidPayload("Invalid payload".to_string()))?;

    let weekday = match request.weekday {
        Some(day) if day > 6 => {
            return Err(AppError::InvalidPayload("Invalid weekday".to_string()));
        }
        Some(day) => day,
        None => today_index(state.clock.now()),
    };

    let items = due_today(&request.schedules, weekday);
    debug!(weekday, scheduled = request.schedules.len(), due = items.len(), "doses due today");
    Ok(Json(DosesTodayResponse { items }))
}
