//! Shared data models for flickrtag
//!
//! [`PhotoRecord`] is the unit everything else trades in: the resolver
//! produces it, the cache persists it, and the renderer merges it into the
//! template context.

use serde::{Deserialize, Serialize};

use crate::constants::PLACEHOLDER_TITLE;

/// Resolved metadata of one photo.
///
/// Serialized field names are also the template variable names
/// (`title`, `raw_url`, `url`, `width`, `height`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Photo title
    pub title: String,

    /// Protocol-relative image URL (`//live.staticflickr.com/...`)
    pub raw_url: String,

    /// Link target, normally the photo page on Flickr
    pub url: String,

    /// Pixel width of the selected size, only when dimensions are included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Pixel height of the selected size, only when dimensions are included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl PhotoRecord {
    /// A record without dimensions.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        raw_url: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            raw_url: raw_url.into(),
            url: url.into(),
            width: None,
            height: None,
        }
    }

    /// The fallback record used when a photo cannot be resolved.
    ///
    /// An unset placeholder image yields an empty `raw_url`.
    #[must_use]
    pub fn placeholder(pict: Option<&str>, link: &str) -> Self {
        Self::new(PLACEHOLDER_TITLE, pict.unwrap_or_default(), link)
    }

    /// Attach dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Whether this record was built from the placeholder settings.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.title == PLACEHOLDER_TITLE && self.width.is_none()
    }
}
