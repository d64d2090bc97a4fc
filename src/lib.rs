//! flickrtag - Flickr photo tags for static site content
//!
//! Content authors reference a Flickr photo with a literal tag in the body of
//! an article or page:
//!
//! ```text
//! Look at this [flickr:id=12345] from the trip.
//! ```
//!
//! When the site is generated, every tag is replaced by an HTML fragment (a
//! captioned, linked image) rendered from a template. Photo metadata comes
//! from the Flickr API and is kept in a flat-file cache so that each photo is
//! only ever fetched once.
//!
//! # Architecture Overview
//!
//! The crate is a plugin for a static site generator. The host calls three
//! hooks ([`plugin::FlickrTag::setup`], then one replacement pass per content
//! kind); each pass:
//!
//! 1. scans the items for tags ([`tags::scan_items`])
//! 2. loads the cache and resolves the ids it does not know
//!    ([`cache::PhotoCache`], [`flickr::PhotoResolver`])
//! 3. persists the cache if anything was fetched
//! 4. renders a fragment per tag and rewrites the bodies
//!    ([`templating::PhotoRenderer`], [`tags::substitute`])
//!
//! A photo that cannot be resolved never fails the build; it renders as the
//! configured placeholder image.
//!
//! # Core Modules
//!
//! - [`config`] - Host settings and the typed plugin configuration
//! - [`plugin`] - Hook entry points and the [`plugin::Generator`] host trait
//! - [`tags`] - Tag scanning and substitution
//! - [`cache`] - Persistent photo metadata cache
//! - [`flickr`] - Flickr REST client and photo resolution
//! - [`templating`] - Tera rendering of photo fragments
//!
//! # Supporting Modules
//!
//! - [`site`] - File-based host used by the CLI
//! - [`content`] - Content items with frontmatter
//! - [`models`] - The cached [`models::PhotoRecord`]
//! - [`core`] - Error types and user-facing error display
//! - [`cli`] - Command-line interface
//!
//! # Settings (flickrtag.toml)
//!
//! ```toml
//! SITENAME = "Holiday photos"
//!
//! FLICKR_API_KEY = "0123456789abcdef"
//! FLICKR_API_SECRET = "fedcba9876543210"
//!
//! # Mandatory: shown for photos that cannot be resolved
//! FLICKR_TAG_PLACE_HOLDER_PICT = "//example.com/missing.png"
//! FLICKR_TAG_PLACE_HOLDER_LINK = "https://example.com"
//!
//! FLICKR_TAG_CACHE_LOCATION = ".cache/flickrtag.json"
//! FLICKR_TAG_INCLUDE_DIMENSIONS = true
//! FLICKR_TAG_IMAGE_SIZE = "Medium 640"   # or "Medium"
//! FLICKR_TAG_TEMPLATE_NAME = "flickr.html"
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod content;
pub mod core;
pub mod flickr;
pub mod models;
pub mod plugin;
pub mod site;
pub mod tags;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
