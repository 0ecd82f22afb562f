//! Rate limiting utilities for GitHub API.
//!
//! Issue creation goes through the core REST budget and the duplicate lookup
//! goes through the search budget. The provisioner queries the relevant
//! budget before each call and sleeps until reset when it is nearly spent.

mod info;

pub use info::{RateLimitInfo, MAX_WAIT_SECS, MIN_REMAINING_THRESHOLD};

use octocrab::Octocrab;
use tracing::{info, warn};

/// Checks the current rate limit status for search API.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_search_rate_limit(
    octocrab: &Octocrab,
) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    Ok(RateLimitInfo::from(&rate_limit.resources.search))
}

/// Checks the current rate limit status for core API (issues, milestones).
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    Ok(RateLimitInfo::from(&rate_limit.resources.core))
}

/// Waits if the rate limit is low, returning true if we waited.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait) = info.wait_at(now) else {
        return false;
    };

    if info.reset.saturating_sub(now) > MAX_WAIT_SECS {
        warn!(
            reset = info.reset,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    info!(
        remaining = info.remaining,
        wait_secs = wait.as_secs(),
        "Rate limit low, waiting for reset"
    );

    tokio::time::sleep(wait).await;
    true
}
