//! Service limit parameters.
//!
//! Groups the knobs that bound resource usage: admission control, cache
//! validity, and member fan-out width. Loaded from file config by the
//! infrastructure layer and passed in at service construction.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hard cap on concurrent member invocations within one round,
/// regardless of panel size.
pub const MAX_MEMBER_CONCURRENCY: usize = 8;

/// Resource-bound parameters for the advisory service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceLimits {
    /// Admission window length in seconds
    pub rate_window_secs: u64,
    /// Maximum admitted calls per identity per window
    pub rate_max_calls: usize,
    /// Round cache validity in seconds
    pub cache_ttl_secs: u64,
    /// Upper bound on concurrent member invocations (clamped to
    /// [`MAX_MEMBER_CONCURRENCY`])
    pub member_concurrency: usize,
}

impl Default for ServiceLimits {
    fn default() -> Self {
        Self {
            rate_window_secs: 60,
            rate_max_calls: 3,
            cache_ttl_secs: 60 * 60 * 24,
            member_concurrency: MAX_MEMBER_CONCURRENCY,
        }
    }
}

impl ServiceLimits {
    pub fn with_rate_window(mut self, secs: u64) -> Self {
        self.rate_window_secs = secs;
        self
    }

    pub fn with_rate_max_calls(mut self, max_calls: usize) -> Self {
        self.rate_max_calls = max_calls;
        self
    }

    pub fn with_cache_ttl(mut self, secs: u64) -> Self {
        self.cache_ttl_secs = secs;
        self
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Effective fan-out width for a panel of `member_count` advisors
    pub fn fan_out_width(&self, member_count: usize) -> usize {
        self.member_concurrency
            .clamp(1, MAX_MEMBER_CONCURRENCY)
            .min(member_count.max(1))
    }
}
