mod doses;
mod health;
mod metrics;
mod quiz;
mod rate_limit;
mod subscription;

pub use doses::doses_today_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use quiz::submit_quiz_handler;
pub use rate_limit::consume_handler;
pub use subscription::subscription_status_handler;

use axum::http::HeaderMap;

use crate::error::AppError;
use crate::metrics::{RATE_LIMITED_TOTAL, RATE_LIMIT_KEYS};
use crate::rate_limit::{
    RateLimitDecision, RateLimitRule, RateLimitStore, client_ip, retry_after_seconds,
};
use crate::state::AppState;

// Count the request against `rule`; rejection becomes a 429 carrying Retry-After
fn enforce_rate_limit(
    state: &AppState,
    headers: &HeaderMap,
    action: &str,
    rule: RateLimitRule,
    message: &str,
) -> Result<RateLimitDecision, AppError> {
    let ip = client_ip(headers);
    let decision = state.limiter.check(action, &ip, rule);
    RATE_LIMIT_KEYS.set(state.limiter.store().len() as f64);

    if decision.allowed {
        return Ok(decision);
    }

    // label by action name only, subjects would blow up cardinality
    let label = action.split(':').next().unwrap_or(action);
    RATE_LIMITED_TOTAL.with_label_values(&[label]).inc();
    Err(AppError::RateLimited {
        message: message.to_string(),
        retry_after: retry_after_seconds(decision.reset_at, state.limiter.now()),
    })
}
