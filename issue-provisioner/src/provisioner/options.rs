//! Provisioning options.

use crate::tracker::{ProjectRef, RepositoryRef};
use std::time::Duration;

/// Default time limit for a single tracker call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where issues are filed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionTarget {
    /// Repository the issues are created in.
    pub repository: RepositoryRef,

    /// Board the created issues are added to.
    pub project: ProjectRef,
}

/// How a provisioning run behaves.
#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    /// Maximum descriptors in flight.
    concurrency: usize,
    /// Time limit for each tracker call.
    timeout: Duration,
    /// Whether to preview without calling the tracker.
    dry_run: bool,
    /// Whether to skip titles that already have an open issue.
    skip_existing: bool,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            timeout: DEFAULT_TIMEOUT,
            dry_run: false,
            skip_existing: false,
        }
    }
}

impl ProvisionOptions {
    /// Sets the maximum number of descriptors in flight. Zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Sets the per-call time limit.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enables or disables the existing-title check.
    #[must_use]
    pub fn with_skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }

    /// Returns the maximum number of descriptors in flight.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Returns the per-call time limit.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns whether existing titles are skipped.
    pub fn skip_existing(&self) -> bool {
        self.skip_existing
    }
}
