//! Run summary types.

use super::result::ProvisioningResult;
use crate::issues::{IssueStatus, ProjectStatus};

/// Summary of a complete provisioning run.
///
/// Built by folding each [`ProvisioningResult`] in with [`RunSummary::record`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of descriptors processed.
    pub attempted: usize,

    /// Number of issues created. Attachment failures do not reduce this.
    pub succeeded: usize,

    /// Number of issues that failed to create.
    pub failed: usize,

    /// Number of issues skipped because they already exist.
    pub skipped: usize,

    /// Number of created issues that could not be added to the project.
    pub attach_failed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Returns the summary with a processing result counted in.
    #[must_use]
    pub fn record(mut self, result: &ProvisioningResult) -> Self {
        self.attempted += 1;
        match result.issue {
            IssueStatus::Created { .. } => self.succeeded += 1,
            IssueStatus::Skipped { .. } => self.skipped += 1,
            IssueStatus::Failed { .. } => self.failed += 1,
        }
        if let ProjectStatus::Failed { .. } = result.project {
            self.attach_failed += 1;
        }
        self
    }

    /// Returns the summary with a previewed (dry run) descriptor counted in.
    #[must_use]
    pub fn record_preview(mut self) -> Self {
        self.attempted += 1;
        self
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.attach_failed > 0
    }

    /// Returns true if all operations were successful.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures()
    }
}
