//! Tracker error types.

use std::time::Duration;
use thiserror::Error;

/// Errors returned by an issue tracker call.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The repository has no milestone with this title.
    #[error("Unknown milestone '{title}'")]
    UnknownMilestone { title: String },

    /// The project board could not be found.
    #[error("Project #{number} not found for owner '{owner}'")]
    ProjectNotFound { owner: String, number: u64 },

    /// GraphQL request returned errors.
    #[error("GraphQL error: {message}")]
    GraphQl { message: String },

    /// The call did not complete in time.
    #[error("Timed out after {after:?}")]
    Timeout { after: Duration },
}
