//! Template rendering error types.

/// Template rendering error.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Handlebars rendering error.
    #[error("Template rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// A rendered field came out empty.
    #[error("Template field '{field}' rendered to an empty string")]
    EmptyField { field: &'static str },
}
