//! Issue and project attachment status types.

use serde::Serialize;

/// Outcome of the issue creation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IssueStatus {
    /// Issue successfully created.
    Created {
        /// GitHub issue number.
        number: u64,
        /// GitHub issue URL.
        url: String,
    },

    /// Issue creation skipped.
    Skipped {
        /// Reason for skipping.
        reason: String,
    },

    /// Issue creation failed.
    Failed {
        /// Error message.
        error: String,
    },
}

impl IssueStatus {
    /// Returns the issue URL if created.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Created { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Outcome of adding a created issue to the project board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Issue was added to the board.
    Attached,

    /// Issue exists but could not be added to the board.
    Failed {
        /// Error message.
        error: String,
    },

    /// No attempt was made (issue not created).
    NotAttempted,
}
