//! Template Renderer Port
//!
//! Resolves a template name and renders it against a `Context`.

use thiserror::Error;

use crate::domain::value_objects::Context;

/// Template resolution and rendering errors
///
/// All variants are configuration errors: they surface before any remote I/O
/// and are not retryable without fixing the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No template is registered under this name
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    /// The template text failed to parse
    #[error("template '{name}' is malformed: {message}")]
    Syntax { name: String, message: String },

    /// Rendering failed, typically a placeholder missing from the context
    #[error("failed to render '{name}': {message}")]
    Render { name: String, message: String },
}

pub trait TemplateRenderer: Send + Sync {
    /// Render `template_name` with `context`
    fn render(&self, template_name: &str, context: &Context) -> Result<String, RenderError>;

    /// Whether `template_name` resolves to a template
    fn has_template(&self, template_name: &str) -> bool;
}

impl<T: TemplateRenderer + ?Sized> TemplateRenderer for &T {
    fn render(&self, template_name: &str, context: &Context) -> Result<String, RenderError> {
        (**self).render(template_name, context)
    }

    fn has_template(&self, template_name: &str) -> bool {
        (**self).has_template(template_name)
    }
}
