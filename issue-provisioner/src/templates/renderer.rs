//! Template renderer.

use crate::issues::IssueDescriptor;
use handlebars::{no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::Value;

use super::{IssueTemplate, TemplateError};

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
/// - `eq` helper for equality comparisons
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Disable HTML escaping for markdown output
    hbs.register_escape_fn(no_escape);

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    hbs.register_helper("eq", Box::new(eq_helper));

    hbs
}

/// Helper function for equality comparison in templates.
///
/// Usage: `{{#if (eq variable "value")}}...{{/if}}`
fn eq_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param1 = h.param(0).and_then(|v| v.value().as_str());
    let param2 = h.param(1).and_then(|v| v.value().as_str());

    let result = match (param1, param2) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    out.write(if result { "true" } else { "" })?;
    Ok(())
}

/// Renders generated issue descriptors from templates.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders one descriptor from a template and one entry's variables.
    ///
    /// Title, body, milestone and every label are rendered against `vars`.
    /// A string `milestone` variable replaces the template's milestone
    /// before rendering.
    ///
    /// # Errors
    ///
    /// Returns an error if a field references a missing variable or a
    /// title, milestone or label renders to an empty string.
    pub fn render_descriptor(
        &self,
        template: &IssueTemplate,
        vars: &Value,
    ) -> Result<IssueDescriptor, TemplateError> {
        let title = self.render_required("title", &template.title, vars)?;
        let body = self.render(&template.body, vars)?;

        let milestone_template = vars
            .get("milestone")
            .and_then(Value::as_str)
            .unwrap_or(&template.milestone);
        let milestone = self.render_required("milestone", milestone_template, vars)?;

        let labels = template
            .labels
            .iter()
            .map(|label| self.render_required("labels", label, vars))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(IssueDescriptor::new(title, body, milestone).with_labels(labels))
    }

    /// Renders a template string with the given data.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render(&self, template: &str, data: &Value) -> Result<String, TemplateError> {
        Ok(self.handlebars.render_template(template, data)?)
    }

    fn render_required(
        &self,
        field: &'static str,
        template: &str,
        data: &Value,
    ) -> Result<String, TemplateError> {
        let rendered = self.render(template, data)?;
        if rendered.trim().is_empty() {
            return Err(TemplateError::EmptyField { field });
        }
        Ok(rendered)
    }
}
