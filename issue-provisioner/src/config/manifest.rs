//! Manifest file deserialization.

use crate::issues::normalize_labels;
use serde::Deserialize;

/// Parsed contents of a `provision.toml` file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ManifestFile {
    /// Target repository in "owner/name" form.
    pub repository: String,

    /// Project board the created issues are added to.
    pub project: ProjectEntry,

    /// Issue groups, in filing order.
    #[serde(default)]
    pub sections: Vec<SectionEntry>,
}

/// The `[project]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectEntry {
    /// User or organization login owning the board.
    pub owner: String,

    /// Project number.
    pub number: u64,

    /// Board URL, printed after the run (optional).
    #[serde(default)]
    pub url: Option<String>,
}

/// A `[[sections]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SectionEntry {
    /// Heading printed before the section's first issue.
    pub name: String,

    /// Explicitly written issues.
    #[serde(default)]
    pub issues: Vec<IssueEntry>,

    /// Issues generated from a template, filed after the explicit ones.
    #[serde(default)]
    pub template: Option<TemplateEntry>,
}

/// A `[[sections.issues]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IssueEntry {
    pub title: String,

    #[serde(default)]
    pub labels: LabelList,

    pub milestone: String,

    /// Inline body.
    #[serde(default)]
    pub body: Option<String>,

    /// Body file, relative to the manifest.
    #[serde(default)]
    pub body_file: Option<String>,
}

/// A `[sections.template]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateEntry {
    /// Handlebars format for titles.
    pub title: String,

    /// Handlebars format for each label.
    #[serde(default)]
    pub labels: LabelList,

    /// Handlebars format for the milestone; entries may override it.
    pub milestone: String,

    /// Inline body template.
    #[serde(default)]
    pub body: Option<String>,

    /// Body template file, relative to the manifest.
    #[serde(default)]
    pub body_file: Option<String>,

    /// One variable table per generated issue.
    #[serde(default)]
    pub entries: Vec<toml::Table>,
}

/// Labels written either as an array or as one comma-joined string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LabelList {
    /// `labels = "Type:Feature,Prio:High"`
    Joined(String),
    /// `labels = ["Type:Feature", "Prio:High"]`
    List(Vec<String>),
}

impl Default for LabelList {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl LabelList {
    /// Returns the labels as a normalized list.
    ///
    /// An empty joined string means no labels.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::Joined(joined) if joined.trim().is_empty() => Vec::new(),
            Self::Joined(joined) => normalize_labels(joined.split(',')),
            Self::List(labels) => normalize_labels(labels.iter().map(String::as_str)),
        }
    }
}
