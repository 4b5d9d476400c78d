//! Fixed-window rate limiting keyed by action and client IP.
//!
//! Counters live behind [`RateLimitStore`] so the in-process [`InMemoryStore`]
//! and a shared cache can be swapped without touching [`RateLimiter`].
//! Entries are never evicted: an expired entry is only replaced when the same
//! key is seen again.

use axum::http::HeaderMap;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::clock::Clock;

/// Bucket name used when no client address header is present.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Rate limit entry - tracks requests per action/IP key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at: DateTime<Utc>,
}

/// Max requests allowed per fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    pub limit: u32,
    pub window: Duration,
}

impl RateLimitRule {
    pub const fn new(limit: u32, window: Duration) -> Self {
        Self { limit, window }
    }

    pub const fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    pub const fn per_hour(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60 * 60))
    }
}

/// Rules for the actions the app throttles, by action name.
pub const PRESETS: &[(&str, RateLimitRule)] = &[
    ("ai-interaction", RateLimitRule::per_hour(10)),
    ("ai-er-triage", RateLimitRule::per_hour(6)),
    ("ai-photo", RateLimitRule::per_hour(10)),
    ("ai-recommendations", RateLimitRule::per_hour(10)),
    ("ai-notes", RateLimitRule::per_hour(30)),
    ("supplement-interactions", RateLimitRule::per_hour(12)),
    ("uploads", RateLimitRule::per_hour(20)),
    ("seed-demo", RateLimitRule::per_minute(3)),
    ("auth-resend-verification", RateLimitRule::per_minute(3)),
];

pub fn preset(action: &str) -> Option<RateLimitRule> {
    PRESETS
        .iter()
        .find(|(name, _)| *name == action)
        .map(|(_, rule)| *rule)
}

/// Outcome of a single [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

/// Storage contract for rate-limit counters.
///
/// `with_entry` is the only required primitive: it hands the accessor the
/// current slot for `key` (None if absent) and writes back whatever the
/// accessor leaves there. Implementations must run the accessor atomically
/// with respect to other calls on the same key.
pub trait RateLimitStore: Send + Sync {
    fn with_entry<R>(&self, key: &str, accessor: impl FnOnce(&mut Option<RateLimitEntry>) -> R) -> R;

    /// Number of keys currently held, expired ones included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, key: &str) -> Option<RateLimitEntry> {
        self.with_entry(key, |slot| *slot)
    }

    fn set(&self, key: &str, entry: RateLimitEntry) {
        self.with_entry(key, |slot| *slot = Some(entry));
    }

    /// Bump the count of an existing entry. Absent keys stay absent.
    fn increment(&self, key: &str) -> Option<RateLimitEntry> {
        self.with_entry(key, |slot| {
            if let Some(entry) = slot.as_mut() {
                entry.count = entry.count.saturating_add(1);
            }
            *slot
        })
    }
}

/// Process-local store. Each key is updated under its DashMap shard lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: DashMap<String, RateLimitEntry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimitStore for InMemoryStore {
    fn with_entry<R>(&self, key: &str, accessor: impl FnOnce(&mut Option<RateLimitEntry>) -> R) -> R {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                let mut slot = Some(*occupied.get());
                let result = accessor(&mut slot);
                match slot {
                    Some(entry) => *occupied.get_mut() = entry,
                    None => {
                        occupied.remove();
                    }
                }
                result
            }
            Entry::Vacant(vacant) => {
                let mut slot = None;
                let result = accessor(&mut slot);
                if let Some(entry) = slot {
                    vacant.insert(entry);
                }
                result
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug)]
pub struct RateLimiter<S = InMemoryStore> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl RateLimiter<InMemoryStore> {
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::new(InMemoryStore::new(), clock)
    }
}

impl<S: RateLimitStore> RateLimiter<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Count one request for `action` from `client_ip` against `rule`.
    ///
    /// A rejected request leaves the entry untouched, so `reset_at` keeps
    /// pointing at the end of the window opened by the first request.
    pub fn check(&self, action: &str, client_ip: &str, rule: RateLimitRule) -> RateLimitDecision {
        let key = format!("{action}:{client_ip}");
        let now = self.clock.now();

        let decision = self.store.with_entry(&key, |slot| {
            // window still open..?
            if let Some(entry) = slot.as_mut().filter(|entry| now < entry.reset_at) {
                if entry.count >= rule.limit {
                    return RateLimitDecision {
                        allowed: false,
                        remaining: 0,
                        reset_at: entry.reset_at,
                    };
                }
                entry.count += 1;
                return RateLimitDecision {
                    allowed: true,
                    remaining: rule.limit.saturating_sub(entry.count),
                    reset_at: entry.reset_at,
                };
            }

            // no entry or window expired -> open a new one
            let reset_at = now
                .checked_add_signed(window_delta(rule.window))
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            *slot = Some(RateLimitEntry { count: 1, reset_at });
            debug!(key = %key, %reset_at, "rate limit window opened");
            RateLimitDecision {
                allowed: true,
                remaining: rule.limit.saturating_sub(1),
                reset_at,
            }
        });

        if !decision.allowed {
            warn!(action, client_ip, reset_at = %decision.reset_at, "rate limit exceeded");
        }
        decision
    }
}

fn window_delta(window: Duration) -> TimeDelta {
    TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX)
}

/// Client address used for bucketing.
///
/// First entry of `x-forwarded-for` if that header is set, else `x-real-ip`,
/// else [`UNKNOWN_CLIENT`].
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        let first = forwarded
            .to_str()
            .ok()
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .unwrap_or_default();
        if first.is_empty() {
            return UNKNOWN_CLIENT.to_string();
        }
        return first.to_string();
    }

    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Seconds until `reset_at`, rounded up, never below one.
pub fn retry_after_seconds(reset_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (reset_at - now).num_milliseconds();
    let seconds = millis.saturating_add(999).div_euclid(1000);
    seconds.max(1) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use axum::http::HeaderValue;

    fn limiter() -> (RateLimiter, MockClock) {
        let clock = MockClock::new(Utc::now());
        (RateLimiter::in_memory(Arc::new(clock.clone())), clock)
    }

    #[test]
    fn test_login_scenario() {
        let (limiter, _clock) = limiter();
        let rule = RateLimitRule::new(3, Duration::from_millis(60_000));

        let first = limiter.check("login", "1.2.3.4", rule);
        let second = limiter.check("login", "1.2.3.4", rule);
        let third = limiter.check("login", "1.2.3.4", rule);
        assert!(first.allowed && second.allowed && third.allowed);
        assert_eq!(
            [first.remaining, second.remaining, third.remaining],
            [2, 1, 0]
        );

        let fourth = limiter.check("login", "1.2.3.4", rule);
        assert!(!fourth.allowed);
        assert_eq!(fourth.remaining, 0);
        assert_eq!(fourth.reset_at, third.reset_at);
    }

    #[test]
    fn test_window_opened_by_first_request() {
        let (limiter, clock) = limiter();
        let rule = RateLimitRule::per_minute(5);
        let opened_at = clock.now();

        limiter.check("quiz", "10.0.0.1", rule);
        clock.advance(TimeDelta::seconds(20));
        let later = limiter.check("quiz", "10.0.0.1", rule);

        assert_eq!(later.reset_at, opened_at + TimeDelta::seconds(60));
        let entry = limiter.store().get("quiz:10.0.0.1").unwrap();
        assert_eq!(entry.count, 2);
    }

    #[test]
    fn test_rejection_does_not_mutate_entry() {
        let (limiter, _clock) = limiter();
        let rule = RateLimitRule::per_minute(1);

        limiter.check("upload", "ip", rule);
        let before = limiter.store().get("upload:ip").unwrap();
        for _ in 0..5 {
            assert!(!limiter.check("upload", "ip", rule).allowed);
        }
        assert_eq!(limiter.store().get("upload:ip").unwrap(), before);
    }

    #[test]
    fn test_fresh_window_after_reset() {
        let (limiter, clock) = limiter();
        let rule = RateLimitRule::new(2, Duration::from_secs(10));

        limiter.check("k", "ip", rule);
        limiter.check("k", "ip", rule);
        assert!(!limiter.check("k", "ip", rule).allowed);

        // exactly at reset_at the old window counts as elapsed
        clock.advance(TimeDelta::seconds(10));
        let decision = limiter.check("k", "ip", rule);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 1);
        assert_eq!(limiter.store().get("k:ip").unwrap().count, 1);
        assert_eq!(decision.reset_at, clock.now() + TimeDelta::seconds(10));
    }

    #[test]
    fn test_remaining_tracks_count() {
        let (limiter, _clock) = limiter();
        let rule = RateLimitRule::per_hour(7);

        for call in 1..=10u32 {
            let decision = limiter.check("ai", "ip", rule);
            let count = limiter.store().get("ai:ip").unwrap().count;
            assert!(count <= rule.limit);
            assert_eq!(decision.allowed, call <= rule.limit);
            assert_eq!(decision.remaining, rule.limit - count);
        }
    }

    #[test]
    fn test_keys_are_separate_per_action_and_ip() {
        let (limiter, _clock) = limiter();
        let rule = RateLimitRule::per_minute(1);

        assert!(limiter.check("a", "1.1.1.1", rule).allowed);
        assert!(limiter.check("b", "1.1.1.1", rule).allowed);
        assert!(limiter.check("a", "2.2.2.2", rule).allowed);
        assert!(!limiter.check("a", "1.1.1.1", rule).allowed);
        assert_eq!(limiter.store().len(), 3);
    }

    #[test]
    fn test_expired_entries_are_kept() {
        let (limiter, clock) = limiter();
        let rule = RateLimitRule::per_minute(1);

        limiter.check("a", "1", rule);
        limiter.check("a", "2", rule);
        clock.advance(TimeDelta::hours(1));
        assert_eq!(limiter.store().len(), 2);
    }

    #[test]
    fn test_concurrent_checks_never_exceed_limit() {
        let (limiter, _clock) = limiter();
        let limiter = Arc::new(limiter);
        let rule = RateLimitRule::per_minute(50);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                std::thread::spawn(move || {
                    (0..20)
                        .filter(|_| limiter.check("burst", "ip", rule).allowed)
                        .count()
                })
            })
            .collect();
        let allowed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(allowed, 50);
    }

    #[test]
    fn test_store_increment_and_set() {
        let store = InMemoryStore::new();
        assert_eq!(store.increment("missing"), None);
        assert!(store.is_empty());

        let reset_at = Utc::now();
        store.set("k", RateLimitEntry { count: 1, reset_at });
        assert_eq!(store.increment("k").unwrap().count, 2);
        assert_eq!(store.get("k").unwrap().count, 2);
    }

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(" 1.2.3.4 , 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("9.9.9.9"));
        assert_eq!(client_ip(&headers), "1.2.3.4");
    }

    #[test]
    fn test_client_ip_fallbacks() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers), UNKNOWN_CLIENT);

        headers.insert("x-real-ip", HeaderValue::from_static("9.9.9.9"));
        assert_eq!(client_ip(&headers), "9.9.9.9");

        // a blank forwarded-for wins over x-real-ip
        headers.insert("x-forwarded-for", HeaderValue::from_static(" ,5.5.5.5"));
        assert_eq!(client_ip(&headers), UNKNOWN_CLIENT);
    }

    #[test]
    fn test_retry_after_seconds() {
        let now = Utc::now();
        assert_eq!(retry_after_seconds(now + TimeDelta::milliseconds(1500), now), 2);
        assert_eq!(retry_after_seconds(now + TimeDelta::seconds(60), now), 60);
        assert_eq!(retry_after_seconds(now + TimeDelta::milliseconds(1), now), 1);
        assert_eq!(retry_after_seconds(now, now), 1);
        assert_eq!(retry_after_seconds(now - TimeDelta::seconds(5), now), 1);
    }

    #[test]
    fn test_presets() {
        assert_eq!(preset("ai-er-triage"), Some(RateLimitRule::per_hour(6)));
        assert_eq!(preset("seed-demo"), Some(RateLimitRule::per_minute(3)));
        assert_eq!(preset("nope"), None);
    }
}
