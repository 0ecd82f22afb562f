//! Rate limit information.

use octocrab::models::Rate;
use std::time::Duration;

/// Maximum time to wait for rate limit reset (1 hour).
pub const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
pub const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Rate limit information for a specific resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Whether few enough requests remain that callers should wait.
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining < MIN_REMAINING_THRESHOLD
    }

    /// How long to wait at unix time `now`, if at all. Capped at [`MAX_WAIT_SECS`].
    #[must_use]
    pub fn wait_at(&self, now: u64) -> Option<Duration> {
        if !self.is_low() || self.reset <= now {
            return None;
        }
        Some(Duration::from_secs((self.reset - now).min(MAX_WAIT_SECS)))
    }
}

impl From<&Rate> for RateLimitInfo {
    fn from(rate: &Rate) -> Self {
        Self {
            remaining: u32::try_from(rate.remaining).unwrap_or(u32::MAX),
            reset: rate.reset,
            limit: u32::try_from(rate.limit).unwrap_or(u32::MAX),
        }
    }
}
