use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use issue_provisioner::{
    provision_with_reporter, CreatedIssue, IssueDescriptor, IssueTracker, ProgressReporter,
    ProjectRef, ProvisionError, ProvisionOptions, ProvisionTarget, RateBudget, RateLimitInfo,
    RepositoryRef, RunSummary, TrackerError,
};

/// In-memory tracker that never deduplicates titles.
#[derive(Default)]
struct FakeTracker {
    fail_create: HashSet<String>,
    fail_attach: HashSet<String>,
    slow_create: HashSet<String>,
    create_delay: HashMap<String, Duration>,
    fail_lookup: bool,
    /// Reports a nearly spent budget that resets this many seconds from now.
    low_budget_reset_secs: Option<u64>,
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    created: Vec<String>,
    attached: Vec<String>,
    budgets: Vec<RateBudget>,
    calls: usize,
}

impl FakeTracker {
    fn failing_create(titles: &[&str]) -> Self {
        Self {
            fail_create: titles.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    fn failing_attach(titles: &[&str]) -> Self {
        Self {
            fail_attach: titles.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    fn created(&self) -> Vec<String> {
        self.state.lock().unwrap().created.clone()
    }

    fn attached(&self) -> Vec<String> {
        self.state.lock().unwrap().attached.clone()
    }

    fn budgets(&self) -> Vec<RateBudget> {
        self.state.lock().unwrap().budgets.clone()
    }

    fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }
}

impl IssueTracker for FakeTracker {
    async fn create_issue(
        &self,
        repository: &RepositoryRef,
        descriptor: &IssueDescriptor,
    ) -> Result<CreatedIssue, TrackerError> {
        self.state.lock().unwrap().calls += 1;

        if self.slow_create.contains(&descriptor.title) {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        if let Some(delay) = self.create_delay.get(&descriptor.title) {
            tokio::time::sleep(*delay).await;
        }

        if self.fail_create.contains(&descriptor.title) {
            return Err(TrackerError::UnknownMilestone {
                title: descriptor.milestone.clone(),
            });
        }

        let mut state = self.state.lock().unwrap();
        state.created.push(descriptor.title.clone());
        let number = state.created.len() as u64;
        Ok(CreatedIssue {
            number,
            url: format!("https://github.com/{repository}/issues/{number}"),
            node_id: descriptor.title.clone(),
        })
    }

    async fn attach_to_project(
        &self,
        issue: &CreatedIssue,
        _project: &ProjectRef,
    ) -> Result<(), TrackerError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;

        if self.fail_attach.contains(&issue.node_id) {
            return Err(TrackerError::GraphQl {
                message: "Resource not accessible by integration".to_string(),
            });
        }

        state.attached.push(issue.node_id.clone());
        Ok(())
    }

    async fn find_existing_issue(
        &self,
        _repository: &RepositoryRef,
        title: &str,
    ) -> Result<Option<u64>, TrackerError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;

        if self.fail_lookup {
            return Err(TrackerError::GraphQl {
                message: "search unavailable".to_string(),
            });
        }

        Ok(state
            .created
            .iter()
            .position(|created| created == title)
            .map(|index| index as u64 + 1))
    }

    async fn rate_limit(
        &self,
        budget: RateBudget,
    ) -> Result<Option<RateLimitInfo>, TrackerError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        state.budgets.push(budget);

        Ok(self.low_budget_reset_secs.map(|secs| {
            let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
            RateLimitInfo {
                remaining: 1,
                reset: now.as_secs() + secs,
                limit: 30,
            }
        }))
    }
}

fn target() -> ProvisionTarget {
    ProvisionTarget {
        repository: RepositoryRef::parse("ughvvv/Idea_Foundry_Kanban").unwrap(),
        project: ProjectRef {
            owner: "ughvvv".to_string(),
            number: 2,
        },
    }
}

fn descriptors(titles: &[&str]) -> Vec<IssueDescriptor> {
    titles
        .iter()
        .map(|title| {
            IssueDescriptor::new(*title, "## Task Objective", "Phase 1: Foundation")
                .with_labels(["Type:Feature", "Prio:High"])
        })
        .collect()
}

async fn run(
    tracker: &FakeTracker,
    descriptors: &[IssueDescriptor],
    options: &ProvisionOptions,
) -> (Result<RunSummary, ProvisionError>, Vec<String>) {
    let mut reporter = ProgressReporter::new(Vec::new());
    let result =
        provision_with_reporter(tracker, descriptors, &target(), options, &mut reporter).await;
    let output = String::from_utf8(reporter.into_inner()).unwrap();
    (result, output.lines().map(str::to_string).collect())
}

#[tokio::test]
async fn all_successful_calls_count_every_descriptor() {
    let tracker = FakeTracker::default();
    let list = descriptors(&["one", "two", "three", "four"]);

    let (summary, _) = run(&tracker, &list, &ProvisionOptions::default()).await;
    let summary = summary.unwrap();

    assert_eq!(summary.attempted, 4);
    assert_eq!(summary.succeeded, 4);
    assert!(summary.all_success());
    assert_eq!(tracker.attached(), vec!["one", "two", "three", "four"]);
}

#[tokio::test]
async fn failed_creation_is_reported_and_run_continues() {
    let tracker = FakeTracker::failing_create(&["#2"]);
    let list = descriptors(&["#1", "#2", "#3"]);

    let (summary, lines) = run(&tracker, &list, &ProvisionOptions::default()).await;
    let summary = summary.unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(tracker.created(), vec!["#1", "#3"]);
    assert_eq!(tracker.attached(), vec!["#1", "#3"]);

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("✓ Created: #1"));
    assert!(lines[1].starts_with("✗ Failed to create: #2"));
    assert!(lines[1].contains("Unknown milestone 'Phase 1: Foundation'"));
    assert!(lines[2].starts_with("✓ Created: #3"));
}

#[tokio::test]
async fn attach_failure_still_counts_as_success() {
    let tracker = FakeTracker::failing_attach(&["only"]);
    let list = descriptors(&["only"]);

    let (summary, lines) = run(&tracker, &list, &ProvisionOptions::default()).await;
    let summary = summary.unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.attach_failed, 1);
    assert!(summary.has_failures());
    assert!(lines[0].contains("could not add it to the project"));
}

#[tokio::test]
async fn attach_failure_matches_successful_run_count() {
    let list = descriptors(&["a", "b", "c"]);

    let ok_tracker = FakeTracker::default();
    let (ok, _) = run(&ok_tracker, &list, &ProvisionOptions::default()).await;

    let failing_tracker = FakeTracker::failing_attach(&["a", "b", "c"]);
    let (failing, _) = run(&failing_tracker, &list, &ProvisionOptions::default()).await;

    assert_eq!(ok.unwrap().succeeded, failing.unwrap().succeeded);
}

#[tokio::test]
async fn empty_list_makes_no_remote_calls() {
    let tracker = FakeTracker::default();

    let (summary, lines) = run(&tracker, &[], &ProvisionOptions::default()).await;
    let summary = summary.unwrap();

    assert_eq!(summary.attempted, 0);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(tracker.calls(), 0);
    assert!(lines.is_empty());
}

#[tokio::test]
async fn malformed_list_fails_before_any_remote_call() {
    let tracker = FakeTracker::default();
    let list = descriptors(&["dup", "other", "dup"]);

    let (result, _) = run(&tracker, &list, &ProvisionOptions::default()).await;

    assert!(matches!(result, Err(ProvisionError::InvalidDescriptor(_))));
    assert_eq!(tracker.calls(), 0);
}

#[tokio::test]
async fn running_twice_creates_duplicates() {
    let tracker = FakeTracker::default();
    let list = descriptors(&["first", "second"]);

    run(&tracker, &list, &ProvisionOptions::default()).await.0.unwrap();
    run(&tracker, &list, &ProvisionOptions::default()).await.0.unwrap();

    assert_eq!(tracker.created().len(), 4);
}

#[tokio::test]
async fn skip_existing_avoids_duplicates_on_rerun() {
    let tracker = FakeTracker::default();
    let list = descriptors(&["first", "second"]);
    let options = ProvisionOptions::default().with_skip_existing(true);

    let (first, _) = run(&tracker, &list, &options).await;
    let (second, lines) = run(&tracker, &list, &options).await;
    let second = second.unwrap();

    assert_eq!(first.unwrap().succeeded, 2);
    assert_eq!(second.succeeded, 0);
    assert_eq!(second.skipped, 2);
    assert!(second.all_success());
    assert_eq!(tracker.created().len(), 2);
    assert!(lines[0].starts_with("- Skipped: first"));
}

#[tokio::test]
async fn timed_out_creation_is_a_failure() {
    let tracker = FakeTracker {
        slow_create: ["slow".to_string()].into_iter().collect(),
        ..Default::default()
    };
    let list = descriptors(&["fast", "slow", "last"]);
    let options = ProvisionOptions::default().with_timeout(Duration::from_millis(50));

    let (summary, lines) = run(&tracker, &list, &options).await;
    let summary = summary.unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert!(lines[1].starts_with("✗ Failed to create: slow: Timed out"));
    assert_eq!(tracker.created(), vec!["fast", "last"]);
}

#[tokio::test]
async fn concurrent_run_matches_sequential_run() {
    let titles = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let list = descriptors(&titles);

    let sequential = FakeTracker::failing_create(&["c", "f"]);
    let (expected, expected_lines) = run(&sequential, &list, &ProvisionOptions::default()).await;

    let mut concurrent = FakeTracker::failing_create(&["c", "f"]);
    concurrent
        .create_delay
        .insert("a".to_string(), Duration::from_millis(50));
    let options = ProvisionOptions::default().with_concurrency(4);
    let (actual, actual_lines) = run(&concurrent, &list, &options).await;

    // "a" finishes after the rest of its window but is still reported first.
    assert_ne!(concurrent.created().first().map(String::as_str), Some("a"));

    let expected = expected.unwrap();
    let actual = actual.unwrap();
    assert_eq!(actual.succeeded, expected.succeeded);
    assert_eq!(actual.failed, expected.failed);

    let first_words = |lines: &[String]| -> Vec<String> {
        lines
            .iter()
            .map(|line| line.split(':').next().unwrap_or_default().to_string())
            .collect()
    };
    assert_eq!(first_words(&actual_lines), first_words(&expected_lines));
    for (line, title) in actual_lines.iter().zip(titles) {
        assert!(line.contains(&format!(" {title}")), "{line} should name {title}");
    }
}

#[tokio::test]
async fn dry_run_previews_without_remote_calls() {
    let tracker = FakeTracker::default();
    let list = descriptors(&["one", "two"]);
    let options = ProvisionOptions::default().with_dry_run(true);

    let (summary, lines) = run(&tracker, &list, &options).await;
    let summary = summary.unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(tracker.calls(), 0);
    assert!(lines.contains(&"[DRY RUN] Would create: one".to_string()));
    assert!(lines.contains(&"[DRY RUN] Would create: two".to_string()));
}

#[tokio::test]
async fn failed_lookup_is_a_failure_and_creates_nothing() {
    let tracker = FakeTracker {
        fail_lookup: true,
        ..Default::default()
    };
    let list = descriptors(&["first", "second"]);
    let options = ProvisionOptions::default().with_skip_existing(true);

    let (summary, lines) = run(&tracker, &list, &options).await;
    let summary = summary.unwrap();

    assert_eq!(summary.failed, 2);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.skipped, 0);
    assert!(tracker.created().is_empty());
    assert!(lines[0].starts_with("✗ Failed to create: first: existing issue check failed"));
    assert!(lines[0].contains("search unavailable"));
}

#[tokio::test]
async fn rate_limit_wait_is_not_bounded_by_call_timeout() {
    let tracker = FakeTracker {
        low_budget_reset_secs: Some(3),
        ..Default::default()
    };
    let list = descriptors(&["only"]);
    let options = ProvisionOptions::default().with_timeout(Duration::from_secs(1));

    let started = Instant::now();
    let (summary, lines) = run(&tracker, &list, &options).await;
    let summary = summary.unwrap();

    assert!(started.elapsed() > Duration::from_secs(1));
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 0);
    assert!(lines[0].starts_with("✓ Created: only"));
    assert_eq!(tracker.created(), vec!["only"]);
}

#[tokio::test]
async fn budgets_are_checked_per_call_kind() {
    let tracker = FakeTracker::default();
    let list = descriptors(&["only"]);
    let options = ProvisionOptions::default().with_skip_existing(true);

    run(&tracker, &list, &options).await.0.unwrap();

    assert_eq!(tracker.budgets(), vec![RateBudget::Search, RateBudget::Core]);
}
