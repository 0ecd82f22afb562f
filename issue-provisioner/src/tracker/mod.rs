//! Remote issue tracker collaborator.
//!
//! The provisioner only needs to create an issue, add it to a project board,
//! and (optionally) look up an existing issue by title. [`IssueTracker`]
//! captures those calls, plus a budget query used to pace them, so the
//! provisioning logic does not depend on GitHub.

mod error;
mod github;
mod target;

pub use error::TrackerError;
pub use github::GitHubTracker;
pub use target::{CreatedIssue, ProjectRef, RepositoryRef};

use crate::issues::IssueDescriptor;
use crate::rate_limit::RateLimitInfo;

/// Request budget a tracker call draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateBudget {
    /// Issue creation and milestone listing.
    Core,
    /// Title lookups.
    Search,
}

/// Operations the provisioner performs against the remote tracker.
#[allow(async_fn_in_trait)]
pub trait IssueTracker {
    /// Creates an issue from a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] if the tracker rejects the issue or cannot
    /// be reached.
    async fn create_issue(
        &self,
        repository: &RepositoryRef,
        descriptor: &IssueDescriptor,
    ) -> Result<CreatedIssue, TrackerError>;

    /// Adds a created issue to a project board.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] if the board cannot be found or updated.
    async fn attach_to_project(
        &self,
        issue: &CreatedIssue,
        project: &ProjectRef,
    ) -> Result<(), TrackerError>;

    /// Finds an open issue whose title matches exactly.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] if the search fails.
    async fn find_existing_issue(
        &self,
        repository: &RepositoryRef,
        title: &str,
    ) -> Result<Option<u64>, TrackerError>;

    /// Reports the remaining budget for a kind of call, if the tracker
    /// has one.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] if the budget cannot be queried.
    async fn rate_limit(
        &self,
        _budget: RateBudget,
    ) -> Result<Option<RateLimitInfo>, TrackerError> {
        Ok(None)
    }
}
