//! Per-issue progress output.

use crate::issues::{IssueDescriptor, IssueStatus, ProjectStatus};
use crate::summary::ProvisioningResult;
use std::fmt;
use std::io::Write;
use tracing::warn;

/// Body lines shown per issue in a dry run.
const PREVIEW_BODY_LINES: usize = 10;

/// Writes one line per processed issue, plus a heading whenever the
/// manifest section changes.
pub struct ProgressReporter<W: Write> {
    out: W,
    current_section: Option<String>,
}

impl<W: Write> ProgressReporter<W> {
    /// Creates a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            current_section: None,
        }
    }

    /// Reports the outcome of one descriptor.
    pub fn report(&mut self, result: &ProvisioningResult) {
        self.section(&result.descriptor);
        let title = &result.descriptor.title;

        match (&result.issue, &result.project) {
            (IssueStatus::Created { url, .. }, ProjectStatus::Failed { error }) => {
                self.line(format_args!(
                    "! Created {title} ({url}) but could not add it to the project: {error}"
                ));
            }
            (IssueStatus::Created { url, .. }, _) => {
                self.line(format_args!("✓ Created: {title} ({url})"));
            }
            (IssueStatus::Skipped { reason }, _) => {
                self.line(format_args!("- Skipped: {title} ({reason})"));
            }
            (IssueStatus::Failed { error }, _) => {
                self.line(format_args!("✗ Failed to create: {title}: {error}"));
            }
        }
    }

    /// Shows what a descriptor would file, without filing it.
    pub fn preview(&mut self, descriptor: &IssueDescriptor) {
        self.section(descriptor);
        self.line(format_args!("[DRY RUN] Would create: {}", descriptor.title));
        self.line(format_args!("    Labels: {}", descriptor.joined_labels()));
        self.line(format_args!("    Milestone: {}", descriptor.milestone));

        for line in descriptor.body.lines().take(PREVIEW_BODY_LINES) {
            self.line(format_args!("    | {line}"));
        }
        if descriptor.body.lines().count() > PREVIEW_BODY_LINES {
            self.line(format_args!("    | ..."));
        }
    }

    /// Consumes the reporter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn section(&mut self, descriptor: &IssueDescriptor) {
        let Some(section) = &descriptor.section else {
            return;
        };
        if self.current_section.as_ref() == Some(section) {
            return;
        }
        self.current_section = Some(section.clone());
        self.line(format_args!("\n{section}:"));
    }

    fn line(&mut self, text: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!(error = %e, "Failed to write progress output");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(reporter: ProgressReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn reports_each_outcome() {
        let mut reporter = ProgressReporter::new(Vec::new());
        let descriptor = IssueDescriptor::new("Set up CI", "body", "Phase 1");

        reporter.report(&ProvisioningResult::created(
            descriptor.clone(),
            3,
            "https://github.com/o/r/issues/3".to_string(),
            ProjectStatus::Attached,
        ));
        reporter.report(&ProvisioningResult::failed(
            descriptor.clone(),
            "Unknown milestone 'Phase 1'".to_string(),
        ));
        reporter.report(&ProvisioningResult::created(
            descriptor,
            4,
            "https://github.com/o/r/issues/4".to_string(),
            ProjectStatus::Failed {
                error: "forbidden".to_string(),
            },
        ));

        let lines: Vec<String> = output(reporter).lines().map(str::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "✓ Created: Set up CI (https://github.com/o/r/issues/3)",
                "✗ Failed to create: Set up CI: Unknown milestone 'Phase 1'",
                "! Created Set up CI (https://github.com/o/r/issues/4) but could not add it to the project: forbidden",
            ]
        );
    }

    #[test]
    fn prints_section_heading_once() {
        let mut reporter = ProgressReporter::new(Vec::new());
        for title in ["a", "b"] {
            reporter.report(&ProvisioningResult::skipped(
                IssueDescriptor::new(title, "body", "m").with_section("General"),
                "exists".to_string(),
            ));
        }

        let text = output(reporter);
        assert_eq!(text.matches("General:").count(), 1);
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let mut reporter = ProgressReporter::new(Vec::new());
        let body = (1..=15).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        reporter.preview(
            &IssueDescriptor::new("Runbooks", body, "Phase 4")
                .with_labels(["Type:Docs", "Prio:Medium"]),
        );

        let text = output(reporter);
        assert!(text.contains("[DRY RUN] Would create: Runbooks"));
        assert!(text.contains("Labels: Type:Docs,Prio:Medium"));
        assert!(text.contains("| line 10"));
        assert!(!text.contains("| line 11"));
        assert!(text.contains("| ..."));
    }
}
