//! Photo fragment rendering with Tera.

use regex::Regex;
use std::sync::LazyLock;
use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};
use tracing::{debug, error};

use super::{DEFAULT_TEMPLATE, TemplateError};
use crate::models::PhotoRecord;
use crate::plugin::Generator;

/// Name the built-in template is registered under.
pub const BUILTIN_TEMPLATE_NAME: &str = "flickrtag/default.html";

/// Maximum edit distance, as a percentage of the variable name's length,
/// for a context key to be suggested.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// A compiled photo template.
///
/// Autoescaping is off: titles and URLs are inserted verbatim.
#[derive(Debug)]
pub struct PhotoRenderer {
    tera: Tera,
    template_name: String,
    custom: bool,
}

impl PhotoRenderer {
    /// The built-in caption template.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::compile(BUILTIN_TEMPLATE_NAME, DEFAULT_TEMPLATE, false)
    }

    /// Compile a custom template from its source.
    pub fn from_source(name: &str, source: &str) -> Result<Self, TemplateError> {
        Self::compile(name, source, true)
    }

    /// Pick the template for one pass.
    ///
    /// With a configured name, the host is asked for the template source; if it
    /// cannot provide one or the source does not compile, the failure is logged
    /// and the built-in template is used instead.
    ///
    /// # Errors
    ///
    /// Only if the built-in template itself fails to compile.
    pub fn resolve<G: Generator + ?Sized>(
        template_name: Option<&str>,
        host: &G,
    ) -> Result<Self, TemplateError> {
        let Some(name) = template_name else {
            return Self::builtin();
        };

        let custom = host
            .get_template(name)
            .map_err(|e| e.to_string())
            .and_then(|source| Self::from_source(name, &source).map_err(|e| e.to_string()));

        match custom {
            Ok(renderer) => {
                debug!("Using custom template {}", name);
                Ok(renderer)
            }
            Err(reason) => {
                error!("Unable to find the custom template {}", name);
                debug!("Custom template {} rejected: {}", name, reason);
                Self::builtin()
            }
        }
    }

    fn compile(name: &str, source: &str, custom: bool) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(name, source).map_err(|e| TemplateError::SyntaxError {
            message: format_tera_error(&e, name),
            template: name.to_string(),
        })?;

        Ok(Self {
            tera,
            template_name: name.to_string(),
            custom,
        })
    }

    /// Name of the active template.
    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    /// Whether a host-supplied template is in use.
    pub fn is_custom(&self) -> bool {
        self.custom
    }

    /// Render one photo.
    ///
    /// The context is `site` overlaid with the record's fields; on a name
    /// clash the record wins.
    pub fn render(&self, site: &TeraContext, record: &PhotoRecord) -> Result<String, TemplateError> {
        let photo = TeraContext::from_serialize(record).map_err(|e| TemplateError::ContextError {
            message: e.to_string(),
        })?;

        let mut context = site.clone();
        context.extend(photo);

        self.tera
            .render(&self.template_name, &context)
            .map_err(|e| self.parse_tera_error(&e, &context))
    }

    fn parse_tera_error(&self, error: &tera::Error, context: &TeraContext) -> TemplateError {
        let chain = error_chain(error);

        if let Some(variable) = chain.iter().find_map(|msg| extract_variable_name(msg)) {
            let available = context_keys(context);
            return TemplateError::VariableNotFound {
                suggestions: find_similar_variables(&variable, &available),
                variable,
                template: self.template_name.clone(),
            };
        }

        TemplateError::SyntaxError {
            message: format_tera_error(error, &self.template_name),
            template: self.template_name.clone(),
        }
    }
}

/// Messages of `error` and all of its sources, outermost first.
fn error_chain(error: &tera::Error) -> Vec<String> {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }
    messages
}

static MISSING_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Variable `([^`]+)` not found").expect("missing-variable pattern is valid")
});

/// Extract variable name from "Variable `foo` not found" message
fn extract_variable_name(error_msg: &str) -> Option<String> {
    MISSING_VARIABLE
        .captures(error_msg).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

fn context_keys(context: &TeraContext) -> Vec<String> {
    match context.clone().into_json() {
        serde_json::Value::Object(map) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

/// Find similar variable names using Levenshtein distance
fn find_similar_variables(target: &str, available: &[String]) -> Vec<String> {
    let mut scored: Vec<_> =
        available.iter().map(|var| (var.clone(), levenshtein(target, var))).collect();
    scored.sort_by_key(|(_, dist)| *dist);

    scored
        .into_iter()
        .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(3)
        .map(|(var, _)| var)
        .collect()
}

/// Flatten a Tera error chain into one readable message, dropping the
/// template-name boilerplate Tera wraps around the real cause.
pub fn format_tera_error(error: &tera::Error, template_name: &str) -> String {
    let quoted = format!("'{template_name}'");
    let wrappers = [
        format!("Failed to render {quoted}"),
        format!("Failed to parse {quoted}"),
    ];

    let messages: Vec<String> = error_chain(error)
        .into_iter()
        .map(|msg| msg.replace(&format!("while rendering {quoted}"), "").trim().to_string())
        .filter(|msg| !msg.is_empty() && !wrappers.contains(msg))
        .collect();

    if messages.is_empty() {
        "Template rendering failed".to_string()
    } else {
        messages.join("\n  → ")
    }
}
