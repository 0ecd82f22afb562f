//! Template rendering using Handlebars.
//!
//! Manifest sections may describe a family of similar issues as a single
//! template plus a list of entries. Each entry's variables are rendered into
//! the title, body, labels and milestone to produce one descriptor.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};

/// Unrendered fields of a generated issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTemplate {
    /// Handlebars format for the title.
    pub title: String,

    /// Handlebars body template.
    pub body: String,

    /// Handlebars format for each label.
    pub labels: Vec<String>,

    /// Handlebars format for the milestone title.
    pub milestone: String,
}
