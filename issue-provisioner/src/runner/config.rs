//! Runner configuration.

use crate::provisioner::{ProvisionOptions, DEFAULT_TIMEOUT};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a provisioning run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the manifest file.
    manifest_path: PathBuf,
    /// GitHub token used for API calls.
    token: String,
    /// Whether to preview issues without creating them.
    dry_run: bool,
    /// Maximum issues filed concurrently.
    concurrency: usize,
    /// Time limit for each GitHub call.
    timeout: Duration,
    /// Whether to skip titles that already have an open issue.
    skip_existing: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(manifest_path: PathBuf, token: String, dry_run: bool, concurrency: usize) -> Self {
        Self {
            manifest_path,
            token,
            dry_run,
            concurrency,
            timeout: DEFAULT_TIMEOUT,
            skip_existing: false,
        }
    }

    /// Sets the per-call time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables skipping titles that already have an open issue.
    pub fn with_skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }

    /// Returns the manifest file path.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the max concurrent issues.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Returns the per-call time limit.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns whether existing titles are skipped.
    pub fn skip_existing(&self) -> bool {
        self.skip_existing
    }

    /// Provisioning options derived from this configuration.
    pub fn provision_options(&self) -> ProvisionOptions {
        ProvisionOptions::default()
            .with_concurrency(self.concurrency)
            .with_timeout(self.timeout)
            .with_dry_run(self.dry_run)
            .with_skip_existing(self.skip_existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_settings_into_options() {
        let config = RunnerConfig::new(PathBuf::from("provision.toml"), "t".to_string(), true, 4)
            .with_timeout(Duration::from_secs(5))
            .with_skip_existing(true);

        let options = config.provision_options();
        assert_eq!(options.concurrency(), 4);
        assert_eq!(options.timeout(), Duration::from_secs(5));
        assert!(options.dry_run());
        assert!(options.skip_existing());
        assert_eq!(config.manifest_path(), Path::new("provision.toml"));
    }
}
