//! Descriptor validation error types.

use thiserror::Error;

/// A descriptor list that cannot be provisioned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid issue #{position} ('{title}'): {message}")]
pub struct InvalidDescriptor {
    /// One-based position of the offending descriptor.
    pub position: usize,

    /// Title of the offending descriptor (may be empty).
    pub title: String,

    /// What is wrong with it.
    pub message: String,
}
