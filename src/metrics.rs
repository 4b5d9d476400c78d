use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Gauge, Histogram, register_counter, register_counter_vec, register_gauge,
    register_histogram,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("fursbliss_requests_total", "Total number of API requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: CounterVec = register_counter_vec!(
        "fursbliss_rate_limited_total",
        "Requests rejected by the rate limiter",
        &["action"]
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "fursbliss_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
    // entries are never evicted, so this only grows
    pub static ref RATE_LIMIT_KEYS: Gauge =
        register_gauge!("fursbliss_rate_limit_keys", "Keys held by the rate limiter").unwrap();
}
