//! Setting keys, defaults, and other constants shared across flickrtag.
//!
//! Setting names follow the upper-case convention of the host configuration
//! file so they can be referenced verbatim from templates.

/// Prefix shared by the three credential settings (`FLICKR_API_TOKEN`, ...).
pub const CREDENTIAL_PREFIX: &str = "FLICKR_API_";

/// Credential suffixes, in the order they are read.
pub const CREDENTIAL_NAMES: [&str; 3] = ["TOKEN", "KEY", "SECRET"];

/// Mandatory image URL used as `raw_url` when a photo cannot be resolved.
pub const PLACEHOLDER_PICT_KEY: &str = "FLICKR_TAG_PLACE_HOLDER_PICT";

/// Link used as `url` when a photo cannot be resolved.
pub const PLACEHOLDER_LINK_KEY: &str = "FLICKR_TAG_PLACE_HOLDER_LINK";

/// Default for [`PLACEHOLDER_LINK_KEY`].
pub const DEFAULT_PLACEHOLDER_LINK: &str = "https://github.com/haum/pelican-flickrtag";

/// Location of the persisted photo metadata cache.
pub const CACHE_LOCATION_KEY: &str = "FLICKR_TAG_CACHE_LOCATION";

/// File name of the default cache, placed in the system temp directory.
pub const DEFAULT_CACHE_FILE_NAME: &str = "com.chrisstreeter.flickrtag-images.cache";

/// Whether rendered images carry `width`/`height` attributes.
pub const INCLUDE_DIMENSIONS_KEY: &str = "FLICKR_TAG_INCLUDE_DIMENSIONS";

/// Image size alias requested from Flickr.
pub const IMAGE_SIZE_KEY: &str = "FLICKR_TAG_IMAGE_SIZE";

/// Default for [`IMAGE_SIZE_KEY`].
pub const DEFAULT_IMAGE_SIZE: &str = "Medium 640";

/// Optional name of a host template replacing the built-in one.
pub const TEMPLATE_NAME_KEY: &str = "FLICKR_TAG_TEMPLATE_NAME";

/// Optional override of the Flickr REST endpoint.
pub const API_ENDPOINT_KEY: &str = "FLICKR_API_ENDPOINT";

/// Default Flickr REST endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.flickr.com/services/rest/";

/// Title given to records built from the placeholder settings.
pub const PLACEHOLDER_TITLE: &str = "Placeholder";

/// User agent sent with every Flickr request.
pub const USER_AGENT: &str = concat!("flickrtag/", env!("CARGO_PKG_VERSION"));

/// Maximum Levenshtein distance for "did you mean" setting suggestions.
pub const SETTING_SUGGESTION_DISTANCE: usize = 3;
