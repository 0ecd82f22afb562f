//! Provisioning manifest loading.
//!
//! A manifest names the target repository and project board and lists the
//! issues to file, grouped into sections:
//!
//! ```text
//! provision/
//! ├── provision.toml
//! └── bodies/
//!     ├── structure.md
//!     └── trainer.md
//! ```
//!
//! Each section may list issues explicitly, generate them from a template,
//! or both. Bodies are written inline or kept in files next to the manifest.

mod error;
mod manifest;

pub use error::ConfigError;
pub use manifest::{
    IssueEntry, LabelList, ManifestFile, ProjectEntry, SectionEntry, TemplateEntry,
};

use crate::issues::{validate_descriptors, IssueDescriptor};
use crate::templates::{IssueTemplate, TemplateRenderer};
use crate::tracker::{ProjectRef, RepositoryRef};
use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// A loaded, validated provisioning manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Repository the issues are created in.
    pub repository: RepositoryRef,

    /// Board the created issues are added to.
    pub project: ProjectRef,

    /// Board URL to show after the run.
    pub project_url: Option<String>,

    /// Issues to file, in order.
    pub descriptors: Vec<IssueDescriptor>,
}

/// Loads and validates a manifest file.
///
/// Body files are resolved relative to the manifest's directory.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file is missing or unreadable, the TOML is
/// invalid, a template fails to render, or validation fails.
pub fn load_manifest(path: &Path) -> Result<Manifest, ConfigError> {
    info!(path = %path.display(), "Loading manifest");

    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let manifest = Manifest::parse(&content, base_dir, &path.display().to_string())?;

    info!(
        repo = %manifest.repository,
        project = %manifest.project,
        count = manifest.descriptors.len(),
        "Loaded manifest"
    );
    Ok(manifest)
}

impl Manifest {
    /// Parses manifest content.
    ///
    /// # Arguments
    ///
    /// * `content` - TOML text
    /// * `base_dir` - Directory body files are resolved against
    /// * `source` - Name used in error messages
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse, render or validation failure.
    pub fn parse(content: &str, base_dir: &Path, source: &str) -> Result<Self, ConfigError> {
        let file: ManifestFile = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: source.to_string(),
            source: e,
        })?;

        let invalid = |message: String| ConfigError::ValidationError {
            path: source.to_string(),
            message,
        };

        let repository = RepositoryRef::parse(&file.repository).ok_or_else(|| {
            invalid(format!(
                "repository must be in 'owner/name' form: '{}'",
                file.repository
            ))
        })?;

        if file.project.owner.trim().is_empty() {
            return Err(invalid("project owner must not be empty".to_string()));
        }
        if file.project.number == 0 {
            return Err(invalid("project number must be positive".to_string()));
        }
        if let Some(url) = &file.project.url {
            if Url::parse(url).is_err() {
                return Err(invalid(format!("project url is not a valid URL: {url}")));
            }
        }

        let renderer = TemplateRenderer::new();
        let mut descriptors = Vec::new();
        for section in &file.sections {
            if section.name.trim().is_empty() {
                return Err(invalid("section name must not be empty".to_string()));
            }
            expand_section(section, base_dir, source, &renderer, &mut descriptors)?;
        }

        validate_descriptors(&descriptors).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            repository,
            project: ProjectRef {
                owner: file.project.owner.trim().to_string(),
                number: file.project.number,
            },
            project_url: file.project.url,
            descriptors,
        })
    }
}

/// Appends a section's explicit issues, then its generated ones.
fn expand_section(
    section: &SectionEntry,
    base_dir: &Path,
    source: &str,
    renderer: &TemplateRenderer,
    descriptors: &mut Vec<IssueDescriptor>,
) -> Result<(), ConfigError> {
    debug!(section = %section.name, "Expanding section");

    for issue in &section.issues {
        let body = resolve_body(
            base_dir,
            source,
            &issue.title,
            issue.body.as_deref(),
            issue.body_file.as_deref(),
        )?;
        descriptors.push(
            IssueDescriptor::new(issue.title.trim(), body, issue.milestone.trim())
                .with_labels(issue.labels.to_vec())
                .with_section(&section.name),
        );
    }

    let Some(template) = &section.template else {
        return Ok(());
    };

    let body = resolve_body(
        base_dir,
        source,
        &format!("{} template", section.name),
        template.body.as_deref(),
        template.body_file.as_deref(),
    )?;
    let issue_template = IssueTemplate {
        title: template.title.clone(),
        body,
        labels: template.labels.to_vec(),
        milestone: template.milestone.clone(),
    };

    for entry in &template.entries {
        let render_error = |message: String| ConfigError::TemplateError {
            section: section.name.clone(),
            message,
        };

        let vars = serde_json::to_value(entry).map_err(|e| render_error(e.to_string()))?;
        let descriptor = renderer
            .render_descriptor(&issue_template, &vars)
            .map_err(|e| render_error(e.to_string()))?;
        descriptors.push(descriptor.with_section(&section.name));
    }

    Ok(())
}

/// Returns the inline body or the contents of the body file.
fn resolve_body(
    base_dir: &Path,
    source: &str,
    owner: &str,
    body: Option<&str>,
    body_file: Option<&str>,
) -> Result<String, ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        path: source.to_string(),
        message,
    };

    let body = match (body, body_file) {
        (Some(body), None) => body.to_string(),
        (None, Some(file)) => {
            let body_path = base_dir.join(file);
            std::fs::read_to_string(&body_path).map_err(|e| ConfigError::IoError {
                path: body_path.display().to_string(),
                source: e,
            })?
        }
        (Some(_), Some(_)) => {
            return Err(invalid(format!("'{owner}' sets both body and body-file")));
        }
        (None, None) => return Err(invalid(format!("'{owner}' has no body or body-file"))),
    };

    if body.trim().is_empty() {
        return Err(invalid(format!("'{owner}' has an empty body")));
    }

    Ok(body)
}
