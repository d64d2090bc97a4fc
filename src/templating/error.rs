//! Template error handling for flickrtag
//!
//! Tera's own errors name internal templates and nest their real cause a few
//! levels deep. [`TemplateError`] flattens them into something a site author
//! can act on.

/// Errors raised while compiling or rendering a photo template.
#[derive(Debug)]
pub enum TemplateError {
    /// The template references a variable neither the site nor the photo defines.
    VariableNotFound {
        variable: String,
        template: String,
        suggestions: Vec<String>,
    },

    /// The template does not parse, or rendering failed for another reason.
    SyntaxError {
        message: String,
        template: String,
    },

    /// The render context could not be built.
    ContextError {
        message: String,
    },
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::VariableNotFound {
                variable,
                template,
                ..
            } => {
                write!(f, "Template variable not found: '{}' in template '{}'", variable, template)
            }
            TemplateError::SyntaxError {
                message,
                template,
            } => {
                write!(f, "Template error in '{}': {}", template, message)
            }
            TemplateError::ContextError {
                message,
            } => {
                write!(f, "Unable to build template context: {}", message)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

impl TemplateError {
    /// Variables every photo template can use.
    pub const AVAILABLE_VARIABLES_HINT: &'static str =
        "Photo templates receive 'title', 'url', 'raw_url', 'width', 'height' and every site setting.";
}
