//! Remote photo metadata from Flickr.
//!
//! The plugin only needs two facts about a photo: its title and photo page
//! (`flickr.photos.getInfo`), and the available image sizes
//! (`flickr.photos.getSizes`). [`PhotoSource`] abstracts exactly those two
//! calls so the resolver can be exercised without network access;
//! [`FlickrClient`] is the REST implementation.
//!
//! # Modules
//!
//! - `client` - [`FlickrClient`], JSON REST calls through `reqwest`
//! - `resolver` - [`PhotoResolver`], turns an id into a [`PhotoRecord`] and
//!   falls back to the placeholder on any failure
//!
//! [`PhotoRecord`]: crate::models::PhotoRecord

pub mod client;
pub mod resolver;

pub use client::FlickrClient;
pub use resolver::{PhotoResolver, ResolveError, ResolverSettings};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Failures talking to Flickr.
#[derive(Error, Debug)]
pub enum FlickrError {
    /// No `FLICKR_API_KEY` configured; no request is sent.
    #[error("No Flickr API key configured")]
    MissingApiKey,

    /// Transport failure, including an unusable endpoint URL
    #[error("Flickr request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Flickr returned HTTP {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// `stat: "fail"` response
    #[error("Flickr API error {code}: {message}")]
    Api {
        /// Flickr error code (1 = photo not found, 100 = invalid key, ...)
        code: i64,
        /// Flickr error message
        message: String,
    },

    /// Response body was not the expected JSON
    #[error("Unexpected Flickr response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A field the plugin needs was absent from an otherwise valid response
    #[error("Flickr response is missing {0}")]
    MissingField(&'static str),
}

/// Title and photo page of a photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoInfo {
    pub id: String,
    pub title: String,
    /// Photo page URL
    pub url: String,
}

/// One entry of `flickr.photos.getSizes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoSize {
    /// Size label, e.g. `"Medium"` or `"Medium 640"`
    pub label: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub width: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub height: u32,
    /// Direct image URL
    pub source: String,
    /// Page URL for this size
    #[serde(default)]
    pub url: String,
}

/// The two remote lookups the resolver relies on.
pub trait PhotoSource {
    /// Title and photo page of `photo_id`.
    fn photo_info(
        &self,
        photo_id: &str,
    ) -> impl Future<Output = Result<PhotoInfo, FlickrError>> + Send;

    /// Available sizes of `photo_id`.
    fn photo_sizes(
        &self,
        photo_id: &str,
    ) -> impl Future<Output = Result<Vec<PhotoSize>, FlickrError>> + Send;
}

/// Flickr sends dimensions as numbers or as numeric strings depending on the endpoint.
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
