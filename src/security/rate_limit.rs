//! Sliding-window rate limiting per message origin.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;

/// A sliding-window request counter keyed by identifier.
///
/// Only accepted requests occupy window capacity; a rejected attempt is not
/// recorded. Expired timestamps are purged lazily on every check, and an
/// identifier whose window empties is removed from the map.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    /// Create a limiter. `max_requests` and `window` are expected to be
    /// non-zero; config validation rejects zero values.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests,
            window,
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(
            config.max_requests as usize,
            Duration::from_millis(config.window_ms),
        )
    }

    /// Check and record a request for `identifier` at the current instant.
    pub fn is_allowed(&self, identifier: &str) -> bool {
        self.is_allowed_at(identifier, Instant::now())
    }

    /// Check and record a request for `identifier` at `now`.
    ///
    /// The sweep, the capacity check and the append happen under a single
    /// lock, so concurrent callers cannot both take the last slot.
    pub fn is_allowed_at(&self, identifier: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");

        // Near process start `now - window` may predate the clock's epoch;
        // nothing can have expired yet in that case.
        if let Some(window_start) = now.checked_sub(self.window) {
            windows.retain(|_, timestamps| {
                while timestamps.front().is_some_and(|t| *t <= window_start) {
                    timestamps.pop_front();
                }
                !timestamps.is_empty()
            });
        }

        let recent = windows.get(identifier).map_or(0, VecDeque::len);
        if recent >= self.max_requests {
            tracing::debug!(identifier = %identifier, recent, "Rate limit window full");
            return false;
        }

        windows
            .entry(identifier.to_string())
            .or_default()
            .push_back(now);
        true
    }

    /// Number of identifiers currently holding live timestamps.
    pub fn tracked_identifiers(&self) -> usize {
        self.windows
            .lock()
            .expect("rate limiter mutex poisoned")
            .len()
    }
}
