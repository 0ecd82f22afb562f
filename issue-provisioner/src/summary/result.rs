//! Processing result types.

use crate::issues::{IssueDescriptor, IssueStatus, ProjectStatus};

/// Result of provisioning a single descriptor.
#[derive(Debug, Clone)]
pub struct ProvisioningResult {
    /// The descriptor this result belongs to.
    pub descriptor: IssueDescriptor,

    /// Issue creation status.
    pub issue: IssueStatus,

    /// Project attachment status.
    pub project: ProjectStatus,
}

impl ProvisioningResult {
    /// An issue that was created, with the outcome of adding it to the board.
    #[must_use]
    pub fn created(
        descriptor: IssueDescriptor,
        number: u64,
        url: String,
        project: ProjectStatus,
    ) -> Self {
        Self {
            descriptor,
            issue: IssueStatus::Created { number, url },
            project,
        }
    }

    /// An issue that could not be created.
    #[must_use]
    pub fn failed(descriptor: IssueDescriptor, error: String) -> Self {
        Self {
            descriptor,
            issue: IssueStatus::Failed { error },
            project: ProjectStatus::NotAttempted,
        }
    }

    /// An issue that was intentionally not created.
    #[must_use]
    pub fn skipped(descriptor: IssueDescriptor, reason: String) -> Self {
        Self {
            descriptor,
            issue: IssueStatus::Skipped { reason },
            project: ProjectStatus::NotAttempted,
        }
    }

    /// Whether the remote issue now exists because of this run.
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self.issue, IssueStatus::Created { .. })
    }

    /// Whether the issue was added to the project board.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        matches!(self.project, ProjectStatus::Attached)
    }

    /// URL of the created issue.
    #[must_use]
    pub fn remote_url(&self) -> Option<&str> {
        self.issue.url()
    }
}
