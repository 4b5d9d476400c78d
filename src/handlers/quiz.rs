use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::enforce_rate_limit;
use crate::breed::life_expectancy;
use crate::error::AppError;
use crate::metrics::{REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{QuizReport, QuizSubmission};
use crate::quiz::{
    ScoreBand, breed_risk_count, breed_tracking_lift, evaluate, interpretation, loy_eligibility,
    supplement_count,
};
use crate::state::AppState;

pub async fn submit_quiz_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<QuizSubmission>, JsonRejection>,
) -> Result<Json<QuizReport>, AppError> {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    let result = submit_quiz(&state, &headers, payload);

    // observed for rejected requests too
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
    result.map(Json)
}

// Only well-formed submissions are charged against the rate limit
fn submit_quiz(
    state: &AppState,
    headers: &HeaderMap,
    payload: Result<Json<QuizSubmission>, JsonRejection>,
) -> Result<QuizReport, AppError> {
    let Json(mut submission) =
        payload.map_err(|_| AppError::InvalidPayload("Invalid payload".to_string()))?;
    let input = submission.validate()?;

    enforce_rate_limit(
        state,
        headers,
        "quiz-submit",
        state.quiz_rule,
        "Too many quiz submissions. Try again later.",
    )?;

    let result = evaluate(&input, &submission.dog_name, &submission.breed);
    let band = ScoreBand::from_score(result.score);
    info!(score = result.score, ?band, breed = %submission.breed, "quiz scored");

    Ok(QuizReport {
        score: result.score,
        band,
        interpretation: interpretation(result.score, &submission.dog_name),
        recommendations: result.recommendations,
        loy_eligibility: loy_eligibility(input.age, input.weight),
        breed_lifespan_range: life_expectancy(&submission.breed, Some(input.weight)).label(),
        tracking_lift: breed_tracking_lift(&submission.breed),
        risk_count: breed_risk_count(&submission.breed),
        supplement_count: supplement_count(input.age, submission.primary_concern()),
    })
}
