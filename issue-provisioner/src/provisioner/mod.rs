//! Bulk issue provisioning.
//!
//! Each descriptor is filed independently: create the issue, then add it to
//! the project board. A failure on one descriptor is recorded and the run
//! moves on. An issue that was created but could not be added to the board
//! still counts as created, and nothing is rolled back.
//!
//! The per-call time limit covers tracker requests only. Sleeping for a
//! rate limit reset happens between calls and is not bounded by it.

mod error;
mod options;
mod report;

pub use error::ProvisionError;
pub use options::{ProvisionOptions, ProvisionTarget, DEFAULT_TIMEOUT};
pub use report::ProgressReporter;

use crate::issues::{validate_descriptors, IssueDescriptor, ProjectStatus};
use crate::rate_limit::wait_if_needed;
use crate::summary::{ProvisioningResult, RunSummary};
use crate::tracker::{IssueTracker, RateBudget, TrackerError};
use futures::future;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Files every descriptor and adds it to the project board, printing one
/// progress line per descriptor to stdout.
///
/// See [`provision_with_reporter`].
///
/// # Errors
///
/// Returns [`ProvisionError`] only if the descriptor list is malformed.
pub async fn provision_all<T: IssueTracker>(
    tracker: &T,
    descriptors: &[IssueDescriptor],
    target: &ProvisionTarget,
    options: &ProvisionOptions,
) -> Result<RunSummary, ProvisionError> {
    let mut reporter = ProgressReporter::new(std::io::stdout());
    provision_with_reporter(tracker, descriptors, target, options, &mut reporter).await
}

/// Files every descriptor and adds it to the project board.
///
/// The list is validated first; a malformed list fails before any tracker
/// call. After that the run always completes: tracker errors and timeouts
/// are recorded per descriptor. Up to [`ProvisionOptions::concurrency`]
/// descriptors are in flight at once, but results are reported and counted
/// in input order.
///
/// # Errors
///
/// Returns [`ProvisionError`] only if the descriptor list is malformed.
pub async fn provision_with_reporter<T: IssueTracker, W: Write>(
    tracker: &T,
    descriptors: &[IssueDescriptor],
    target: &ProvisionTarget,
    options: &ProvisionOptions,
    reporter: &mut ProgressReporter<W>,
) -> Result<RunSummary, ProvisionError> {
    validate_descriptors(descriptors)?;

    let summary = RunSummary::new(options.dry_run());
    if descriptors.is_empty() {
        warn!("No issues to provision");
        return Ok(summary);
    }

    if options.dry_run() {
        info!(count = descriptors.len(), "Dry run, no issues will be created");
        return Ok(descriptors.iter().fold(summary, |summary, descriptor| {
            reporter.preview(descriptor);
            summary.record_preview()
        }));
    }

    info!(
        count = descriptors.len(),
        repo = %target.repository,
        project = %target.project,
        concurrency = options.concurrency(),
        "Provisioning issues"
    );

    let summary = stream::iter(descriptors)
        .map(|descriptor| provision_descriptor(tracker, descriptor, target, options))
        .buffered(options.concurrency())
        .fold(summary, |summary, result| {
            reporter.report(&result);
            future::ready(summary.record(&result))
        })
        .await;

    info!(
        attempted = summary.attempted,
        succeeded = summary.succeeded,
        failed = summary.failed,
        attach_failed = summary.attach_failed,
        "Provisioning finished"
    );
    Ok(summary)
}

async fn provision_descriptor<T: IssueTracker>(
    tracker: &T,
    descriptor: &IssueDescriptor,
    target: &ProvisionTarget,
    options: &ProvisionOptions,
) -> ProvisioningResult {
    let span = info_span!("provision_issue", title = %descriptor.title);

    async {
        debug!("Provisioning issue");

        if options.skip_existing() {
            let lookup = tracker.find_existing_issue(&target.repository, &descriptor.title);
            match paced(tracker, RateBudget::Search, options.timeout(), lookup).await {
                Ok(Some(number)) => {
                    info!(issue_number = number, "Issue already exists, skipping");
                    return ProvisioningResult::skipped(
                        descriptor.clone(),
                        format!("issue #{number} already exists"),
                    );
                }
                Ok(None) => {}
                Err(e) => {
                    error!(error = %e, "Failed to check for existing issue");
                    return ProvisioningResult::failed(
                        descriptor.clone(),
                        format!("existing issue check failed: {e}"),
                    );
                }
            }
        }

        let create = tracker.create_issue(&target.repository, descriptor);
        let issue = match paced(tracker, RateBudget::Core, options.timeout(), create).await {
            Ok(issue) => issue,
            Err(e) => {
                error!(error = %e, "Failed to create issue");
                return ProvisioningResult::failed(descriptor.clone(), e.to_string());
            }
        };

        let attach = tracker.attach_to_project(&issue, &target.project);
        let project = match with_timeout(options.timeout(), attach).await {
            Ok(()) => ProjectStatus::Attached,
            Err(e) => {
                warn!(
                    issue_number = issue.number,
                    error = %e,
                    "Failed to add issue to project"
                );
                ProjectStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        ProvisioningResult::created(descriptor.clone(), issue.number, issue.url, project)
    }
    .instrument(span)
    .await
}

/// Runs `call` once `budget` allows it. The budget query and the call are
/// each bounded by `limit`; the sleep until reset is not.
async fn paced<T: IssueTracker, R>(
    tracker: &T,
    budget: RateBudget,
    limit: Duration,
    call: impl Future<Output = Result<R, TrackerError>>,
) -> Result<R, TrackerError> {
    if let Some(info) = with_timeout(limit, tracker.rate_limit(budget)).await? {
        wait_if_needed(&info).await;
    }
    with_timeout(limit, call).await
}

/// Bounds a tracker call, mapping expiry to [`TrackerError::Timeout`].
async fn with_timeout<R>(
    limit: Duration,
    call: impl Future<Output = Result<R, TrackerError>>,
) -> Result<R, TrackerError> {
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or_else(|_| Err(TrackerError::Timeout { after: limit }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn with_timeout_passes_result_through() {
        let call = async { Ok::<_, TrackerError>(7) };
        let result = with_timeout(Duration::from_secs(1), call).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn with_timeout_reports_expiry() {
        let limit = Duration::from_millis(10);
        let result = with_timeout(limit, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, TrackerError>(())
        })
        .await;

        assert!(matches!(result, Err(TrackerError::Timeout { after }) if after == limit));
    }
}
