//! Remote targets of a provisioning run.

use serde::Serialize;
use std::fmt;

/// A repository in "owner/name" form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryRef {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl RepositoryRef {
    /// Parses "owner/name". Returns `None` unless both parts are non-empty.
    #[must_use]
    pub fn parse(full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Full repository name in "owner/name" format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A project board identified by its owner login and number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectRef {
    /// User or organization login that owns the board.
    pub owner: String,

    /// Project number as shown in the board URL.
    pub number: u64,
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.owner, self.number)
    }
}

/// An issue created on the remote tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    /// Issue number.
    pub number: u64,

    /// Issue web URL.
    pub url: String,

    /// Global node ID, used to add the issue to a project.
    pub node_id: String,
}
