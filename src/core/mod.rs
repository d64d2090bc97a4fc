//! Core types for flickrtag
//!
//! This module holds the error types shared by the library and the CLI.
//! See [`error`] for the split between fatal errors and the failures a
//! generation pass absorbs by logging.

pub mod error;

pub use error::{ErrorContext, FlickrTagError, user_friendly_error};
