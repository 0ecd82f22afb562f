#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod issues;
pub mod provisioner;
pub mod rate_limit;
pub mod runner;
pub mod summary;
pub mod templates;
pub mod tracker;

pub use config::{load_manifest, ConfigError, LabelList, Manifest, ManifestFile};
pub use issues::{
    normalize_labels, validate_descriptors, InvalidDescriptor, IssueDescriptor, IssueStatus,
    ProjectStatus,
};
pub use provisioner::{
    provision_all, provision_with_reporter, ProgressReporter, ProvisionError, ProvisionOptions,
    ProvisionTarget, DEFAULT_TIMEOUT,
};
pub use rate_limit::{
    check_core_rate_limit, check_search_rate_limit, wait_if_needed, RateLimitInfo,
};
pub use runner::{RunOutcome, Runner, RunnerConfig, RunnerError};
pub use summary::{ProvisioningResult, RunSummary};
pub use templates::{create_handlebars_registry, IssueTemplate, TemplateError, TemplateRenderer};
pub use tracker::{
    CreatedIssue, GitHubTracker, IssueTracker, ProjectRef, RateBudget, RepositoryRef,
    TrackerError,
};
