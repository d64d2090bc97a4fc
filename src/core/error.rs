//! Error handling for flickrtag
//!
//! Two layers, mirroring how the rest of the crate reports failures:
//! - [`FlickrTagError`] - typed errors for the few failures that abort a run
//!   (unreadable settings, unwritable cache, unreadable content)
//! - [`ErrorContext`] - a wrapper adding details and suggestions for CLI display
//!
//! Most failures inside a generation pass are not errors: missing
//! settings, unreadable caches, failed Flickr lookups and missing templates are
//! logged and degrade to defaults or placeholders. Only the cases below surface.
//!
//! # Examples
//!
//! ```rust,no_run
//! use flickrtag::core::{FlickrTagError, user_friendly_error};
//!
//! let error = FlickrTagError::SettingsNotFound {
//!     path: "flickrtag.toml".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::templating::TemplateError;

/// Errors that abort a flickrtag run.
#[derive(Error, Debug, Clone)]
pub enum FlickrTagError {
    /// The settings file does not exist
    #[error("Settings file not found: {path}")]
    SettingsNotFound {
        /// Path that was looked up
        path: String,
    },

    /// The settings file exists but is not valid TOML
    #[error("Invalid settings file syntax in {file}")]
    SettingsParseError {
        /// Settings file path
        file: String,
        /// Parser message
        reason: String,
    },

    /// The photo cache could not be written back to disk.
    ///
    /// This is the one fatal path of a generation pass: the freshly fetched
    /// metadata would otherwise be lost silently.
    #[error("Failed to persist photo cache to {path}")]
    CachePersistFailed {
        /// Cache file path
        path: String,
        /// Underlying I/O or serialization message
        reason: String,
    },

    /// A content file could not be read or split into frontmatter and body
    #[error("Failed to read content file {path}")]
    ContentReadError {
        /// Content file path
        path: String,
        /// Underlying message
        reason: String,
    },

    /// A rendered content file could not be written
    #[error("Failed to write output file {path}")]
    OutputWriteError {
        /// Output file path
        path: String,
        /// Underlying message
        reason: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// An error plus optional details and a suggested fix, for terminal display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: FlickrTagError,
    /// What the user can do about it
    pub suggestion: Option<String>,
    /// Extra background on the failure
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error without details or suggestion.
    #[must_use]
    pub const fn new(error: FlickrTagError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// Typed [`FlickrTagError`]s anywhere in the `anyhow` chain get a tailored
/// suggestion, template errors carry their variable suggestions, and
/// everything else is reported with its full context chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(flickrtag_error) = cause.downcast_ref::<FlickrTagError>() {
            return create_error_context(flickrtag_error.clone());
        }

        if let Some(template_error) = cause.downcast_ref::<TemplateError>() {
            let message = error.chain().map(ToString::to_string).collect::<Vec<_>>().join(": ");
            return template_error_context(template_error, message);
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>()
        && io_error.kind() == std::io::ErrorKind::PermissionDenied
    {
        return ErrorContext::new(FlickrTagError::Other {
            message: io_error.to_string(),
        })
        .with_suggestion("Check file ownership and permissions of the content, output and cache paths");
    }

    let message = error.chain().map(ToString::to_string).collect::<Vec<_>>().join(": ");
    ErrorContext::new(FlickrTagError::Other {
        message,
    })
}

fn template_error_context(error: &TemplateError, message: String) -> ErrorContext {
    let ctx = ErrorContext::new(FlickrTagError::Other {
        message,
    });

    match error {
        TemplateError::VariableNotFound {
            suggestions,
            ..
        } if !suggestions.is_empty() => ctx
            .with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")))
            .with_details(TemplateError::AVAILABLE_VARIABLES_HINT),
        TemplateError::VariableNotFound {
            ..
        } => ctx
            .with_suggestion("Check the variable names used in the template")
            .with_details(TemplateError::AVAILABLE_VARIABLES_HINT),
        _ => ctx.with_suggestion("Check your template syntax and variable declarations"),
    }
}

fn create_error_context(error: FlickrTagError) -> ErrorContext {
    match &error {
        FlickrTagError::SettingsNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Create a flickrtag.toml file or point --settings (or FLICKRTAG_SETTINGS) at an existing one")
            .with_details("The settings file holds the Flickr credentials and the FLICKR_TAG_* options"),

        FlickrTagError::SettingsParseError {
            reason,
            ..
        } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Check the TOML syntax of the settings file. Verify quotes, brackets, and key names")
                .with_details(details)
        }

        FlickrTagError::CachePersistFailed {
            reason,
            ..
        } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Set FLICKR_TAG_CACHE_LOCATION to a writable path")
                .with_details(details)
        }

        FlickrTagError::ContentReadError {
            reason,
            ..
        }
        | FlickrTagError::OutputWriteError {
            reason,
            ..
        } => {
            let details = reason.clone();
            ErrorContext::new(error).with_details(details)
        }

        _ => ErrorContext::new(error),
    }
}
