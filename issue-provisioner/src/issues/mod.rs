//! Issue descriptors and per-issue outcomes.
//!
//! A descriptor is the static record of one issue to file. Descriptor lists
//! are validated as a whole before a run starts, since a malformed list must
//! fail without touching the remote tracker.

mod descriptor;
mod error;
mod status;

pub use descriptor::{normalize_labels, IssueDescriptor};
pub use error::InvalidDescriptor;
pub use status::{IssueStatus, ProjectStatus};

use std::collections::HashSet;

/// Checks that a descriptor list can be provisioned.
///
/// Every title must be non-empty and unique within the list, and every
/// descriptor must name a milestone. Labels and milestone names are not
/// checked against the repository; the tracker rejects those per issue.
///
/// # Errors
///
/// Returns the first [`InvalidDescriptor`] found, in list order.
pub fn validate_descriptors(descriptors: &[IssueDescriptor]) -> Result<(), InvalidDescriptor> {
    let mut seen = HashSet::new();

    for (index, descriptor) in descriptors.iter().enumerate() {
        let invalid = |message: &str| InvalidDescriptor {
            position: index + 1,
            title: descriptor.title.clone(),
            message: message.to_string(),
        };

        let title = descriptor.title.trim();
        if title.is_empty() {
            return Err(invalid("title must not be empty"));
        }

        if !seen.insert(title) {
            return Err(invalid("title is used by an earlier issue"));
        }

        if descriptor.milestone.trim().is_empty() {
            return Err(invalid("milestone must not be empty"));
        }

        if descriptor.labels.iter().any(|label| label.trim().is_empty()) {
            return Err(invalid("labels must not be empty"));
        }
    }

    Ok(())
}
