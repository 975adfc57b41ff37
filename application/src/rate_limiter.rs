//! Per-identity sliding-window admission control.
//!
//! Each caller identity owns a window of admission timestamps. Windows for
//! distinct identities live in separate [`DashMap`] shards, so unrelated
//! callers never contend on one lock. The limiter only accepts or rejects
//! the current instant; it computes no backoff guidance.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Sliding-window rate limiter keyed by opaque identity strings
///
/// Callers are expected to append an operation suffix to the identity
/// (e.g. `":run"`, `":clarify"`) so one operation's usage does not
/// exhaust another's quota.
pub struct RateLimiter {
    windows: DashMap<String, Vec<Instant>>,
    window: Duration,
    max_calls: usize,
}

impl RateLimiter {
    pub fn new(window: Duration, max_calls: usize) -> Self {
        Self {
            windows: DashMap::new(),
            window,
            max_calls,
        }
    }

    /// Admit or reject one request for `identity` at the current instant.
    ///
    /// Timestamps older than the window are pruned lazily on each check,
    /// so a window never holds more than `max_calls` live entries. A
    /// rejection leaves the window unchanged.
    pub fn admit(&self, identity: &str) -> bool {
        let now = Instant::now();
        let mut window = self.windows.entry(identity.to_string()).or_default();

        window.retain(|&stamp| now.duration_since(stamp) < self.window);

        if window.len() >= self.max_calls {
            return false;
        }
        window.push(now);
        true
    }

    /// Number of live admissions for an identity (diagnostics)
    pub fn in_flight(&self, identity: &str) -> usize {
        let now = Instant::now();
        self.windows
            .get(identity)
            .map(|w| {
                w.iter()
                    .filter(|&&stamp| now.duration_since(stamp) < self.window)
                    .count()
            })
            .unwrap_or(0)
    }
}

impl Default for RateLimiter {
    /// 3 admissions per 60-second window
    fn default() -> Self {
        Self::new(Duration::from_secs(60), 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fourth_call_in_window_rejected() {
        let limiter = RateLimiter::default();
        assert!(limiter.admit("alice"));
        assert!(limiter.admit("alice"));
        assert!(limiter.admit("alice"));
        assert!(!limiter.admit("alice"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_expiry_readmits() {
        let limiter = RateLimiter::default();
        for _ in 0..3 {
            assert!(limiter.admit("alice"));
        }
        assert!(!limiter.admit("alice"));

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(limiter.admit("alice"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_identities_are_independent() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 1);
        assert!(limiter.admit("alice:run"));
        assert!(!limiter.admit("alice:run"));
        // Different operation suffix draws from its own quota
        assert!(limiter.admit("alice:clarify"));
        assert!(limiter.admit("bob:run"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejection_leaves_window_unchanged() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 2);
        assert!(limiter.admit("alice"));
        assert!(limiter.admit("alice"));
        assert!(!limiter.admit("alice"));
        assert_eq!(limiter.in_flight("alice"), 2);

        // Rejections never extend the window: once the first two stamps
        // age out, admission resumes
        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(limiter.admit("alice"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_window_expiry() {
        let limiter = RateLimiter::default();
        assert!(limiter.admit("alice"));
        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(limiter.admit("alice"));
        assert!(limiter.admit("alice"));
        assert!(!limiter.admit("alice"));

        // First stamp ages out; the later two remain
        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(limiter.admit("alice"));
        assert!(!limiter.admit("alice"));
    }
}
