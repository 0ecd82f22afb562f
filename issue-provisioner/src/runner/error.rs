//! Runner error types.

/// Errors that abort a provisioning run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Manifest loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Descriptor list rejected by the provisioner.
    #[error(transparent)]
    Provision(#[from] crate::provisioner::ProvisionError),
}
