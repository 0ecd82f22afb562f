//! Orchestrates a provisioning run from a manifest file.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::config::load_manifest;
use crate::provisioner::{provision_all, ProvisionTarget};
use crate::summary::RunSummary;
use crate::tracker::GitHubTracker;
use octocrab::Octocrab;
use tracing::info;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Counts for the run.
    pub summary: RunSummary,

    /// Board URL from the manifest, if any.
    pub project_url: Option<String>,
}

/// Runs the provisioner against GitHub.
pub struct Runner {
    config: RunnerConfig,
    octocrab: Octocrab,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let octocrab = Octocrab::builder()
            .personal_token(config.token().to_string())
            .build()?;
        Ok(Self { config, octocrab })
    }

    /// Loads the manifest and files every issue in it.
    pub async fn run(&self) -> Result<RunOutcome, RunnerError> {
        let manifest = load_manifest(self.config.manifest_path())?;

        let target = ProvisionTarget {
            repository: manifest.repository,
            project: manifest.project,
        };
        info!(
            repo = %target.repository,
            project = %target.project,
            dry_run = self.config.dry_run(),
            "Starting provisioning run"
        );

        let tracker = GitHubTracker::new(self.octocrab.clone());
        let summary = provision_all(
            &tracker,
            &manifest.descriptors,
            &target,
            &self.config.provision_options(),
        )
        .await?;

        Ok(RunOutcome {
            summary,
            project_url: manifest.project_url,
        })
    }
}
