use std::sync::Arc;

use crate::clock::Clock;
use crate::rate_limit::{RateLimitRule, RateLimiter};

// app's shared state
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub limiter: RateLimiter,
    pub quiz_rule: RateLimitRule, // quiz submissions per client
}

impl AppState {
    pub fn new(clock: Arc<dyn Clock>, quiz_rule: RateLimitRule) -> Self {
        Self {
            limiter: RateLimiter::in_memory(Arc::clone(&clock)),
            clock,
            quiz_rule,
        }
    }
}
