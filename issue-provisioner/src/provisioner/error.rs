//! Provisioning error types.

use crate::issues::InvalidDescriptor;

/// Errors that abort a provisioning run before any issue is filed.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// The descriptor list is malformed.
    #[error(transparent)]
    InvalidDescriptor(#[from] InvalidDescriptor),
}
