//! FursBliss policy service.
//!
//! Small decision utilities behind the dog health app, served over HTTP:
//!
//! - [`rate_limit`]: fixed-window limiter keyed by action and client IP
//! - [`subscription`]: premium access check for subscription snapshots
//! - [`quiz`]: longevity readiness score, recommendations and result insights
//! - [`doses`]: whether a recurring supplement dose is due today
//! - [`breed`]: life expectancy ranges by breed and weight class
//!
//! Rate-limit counters are process-local. Running several instances means
//! each enforces its own limit.

pub mod breed;
pub mod clock;
pub mod config;
pub mod doses;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod quiz;
pub mod rate_limit;
pub mod state;
pub mod subscription;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/api/quiz/submit", post(handlers::submit_quiz_handler))
        .route("/api/doses/today", post(handlers::doses_today_handler))
        .route(
            "/api/subscription/status",
            post(handlers::subscription_status_handler),
        )
        .route("/api/rate-limit/{action}", post(handlers::consume_handler))
        .with_state(state)
}
