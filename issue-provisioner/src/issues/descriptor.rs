//! Issue descriptor type.

use serde::Serialize;

/// A single issue to be filed during a provisioning run.
///
/// Descriptors are built from the manifest before any remote call is made
/// and are never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueDescriptor {
    /// Issue title. Unique within a run.
    pub title: String,

    /// Markdown body.
    pub body: String,

    /// Label names, deduplicated in first-seen order.
    pub labels: Vec<String>,

    /// Title of the milestone the issue is filed under.
    pub milestone: String,

    /// Manifest section the descriptor came from, used for progress headings.
    pub section: Option<String>,
}

impl IssueDescriptor {
    /// Creates a descriptor without labels or section.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        milestone: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            labels: Vec::new(),
            milestone: milestone.into(),
            section: None,
        }
    }

    /// Replaces the label set.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = normalize_labels(labels);
        self
    }

    /// Sets the section name.
    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Labels in their comma-joined transport form.
    #[must_use]
    pub fn joined_labels(&self) -> String {
        self.labels.join(",")
    }
}

/// Trims label names and drops repeats, keeping the first occurrence.
pub fn normalize_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut normalized: Vec<String> = Vec::new();
    for label in labels {
        let label = label.into().trim().to_string();
        if !normalized.contains(&label) {
            normalized.push(label);
        }
    }
    normalized
}
