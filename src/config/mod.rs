//! Configuration for flickrtag
//!
//! Configuration lives in the host's settings file (`flickrtag.toml` by
//! default), a flat TOML table of upper-case keys:
//!
//! ```toml
//! FLICKR_API_KEY = "0123456789abcdef"
//! FLICKR_API_SECRET = "fedcba9876543210"
//! FLICKR_API_TOKEN = "72157600000000000-0000000000000000"
//!
//! FLICKR_TAG_PLACE_HOLDER_PICT = "//example.com/images/missing.png"
//! FLICKR_TAG_PLACE_HOLDER_LINK = "https://example.com/"
//! FLICKR_TAG_CACHE_LOCATION = "/tmp/flickrtag.cache"
//! FLICKR_TAG_INCLUDE_DIMENSIONS = false
//! FLICKR_TAG_IMAGE_SIZE = "Medium 640"
//! FLICKR_TAG_TEMPLATE_NAME = "flickr.html"
//! ```
//!
//! # Modules
//!
//! - `settings` - the untyped key/value store shared with templates
//! - `plugin` - the typed [`FlickrTagConfig`] and its loader

pub mod plugin;
pub mod settings;

pub use plugin::{Credentials, FlickrTagConfig, ImageSize, default_cache_location};
pub use settings::Settings;
