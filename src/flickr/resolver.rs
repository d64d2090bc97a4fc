//! Photo id to [`PhotoRecord`] resolution.
//!
//! [`PhotoResolver::resolve`] never fails. Whatever goes wrong while talking
//! to Flickr (no API key, network failure, unknown id, size not offered) the
//! caller receives the placeholder record instead, so one bad id never
//! affects the others.

use thiserror::Error;
use tracing::debug;

use super::{FlickrError, PhotoSource};
use crate::config::{FlickrTagConfig, ImageSize};
use crate::models::PhotoRecord;

/// Why a photo could not be resolved.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Remote(#[from] FlickrError),

    #[error("Photo {photo_id} has no \"{label}\" size")]
    SizeNotAvailable {
        photo_id: String,
        label: &'static str,
    },
}

/// The subset of the plugin configuration that shapes a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    pub image_size: ImageSize,
    pub include_dimensions: bool,
    pub placeholder_pict: Option<String>,
    pub placeholder_link: String,
}

impl ResolverSettings {
    #[must_use]
    pub fn from_config(config: &FlickrTagConfig) -> Self {
        Self {
            image_size: config.image_size(),
            include_dimensions: config.include_dimensions,
            placeholder_pict: config.placeholder_pict.clone(),
            placeholder_link: config.placeholder_link.clone(),
        }
    }

    /// The record substituted for unresolvable photos.
    #[must_use]
    pub fn placeholder(&self) -> PhotoRecord {
        PhotoRecord::placeholder(self.placeholder_pict.as_deref(), &self.placeholder_link)
    }
}

/// Resolves photo ids against a [`PhotoSource`].
#[derive(Debug)]
pub struct PhotoResolver<S> {
    source: S,
    settings: ResolverSettings,
}

impl<S: PhotoSource> PhotoResolver<S> {
    pub fn new(source: S, settings: ResolverSettings) -> Self {
        Self {
            source,
            settings,
        }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch title, page and image of `photo_id`.
    ///
    /// # Errors
    ///
    /// Any remote failure, or [`ResolveError::SizeNotAvailable`] when Flickr
    /// does not offer the configured size for this photo.
    pub async fn try_resolve(&self, photo_id: &str) -> Result<PhotoRecord, ResolveError> {
        let info = self.source.photo_info(photo_id).await?;
        let sizes = self.source.photo_sizes(photo_id).await?;

        let label = self.settings.image_size.label();
        let size = sizes.iter().find(|s| s.label == label).ok_or_else(|| {
            ResolveError::SizeNotAvailable {
                photo_id: photo_id.to_string(),
                label,
            }
        })?;

        let record = PhotoRecord::new(info.title, protocol_relative(&size.source), info.url);
        Ok(if self.settings.include_dimensions {
            record.with_dimensions(size.width, size.height)
        } else {
            record
        })
    }

    /// Like [`try_resolve`](Self::try_resolve), falling back to the placeholder.
    pub async fn resolve(&self, photo_id: &str) -> PhotoRecord {
        match self.try_resolve(photo_id).await {
            Ok(record) => record,
            Err(e) => {
                debug!("Using placeholder for photo {}: {}", photo_id, e);
                self.settings.placeholder()
            }
        }
    }
}

/// Drop the scheme so the image loads over whatever protocol the page uses.
fn protocol_relative(url: &str) -> String {
    url.strip_prefix("https:")
        .or_else(|| url.strip_prefix("http:"))
        .unwrap_or(url)
        .to_string()
}
