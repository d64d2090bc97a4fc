//! Typed flickrtag configuration, read from host [`Settings`].
//!
//! [`FlickrTagConfig::from_settings`] is the credential/config loader that runs
//! once when the generator is initialized. It never fails: missing values are
//! reported through `tracing` and the run continues with degraded behavior
//! (no credentials means every photo resolves to the placeholder, a missing
//! placeholder image renders as an empty `src`).
//!
//! Defaults are written back into the settings so templates see the same
//! values the plugin uses (`FLICKR_TAG_INCLUDE_DIMENSIONS` in particular).

use std::fmt;
use std::path::PathBuf;
use strsim::levenshtein;
use tracing::{error, warn};

use super::Settings;
use crate::constants::{
    API_ENDPOINT_KEY, CACHE_LOCATION_KEY, CREDENTIAL_NAMES, CREDENTIAL_PREFIX,
    DEFAULT_API_ENDPOINT, DEFAULT_CACHE_FILE_NAME, DEFAULT_IMAGE_SIZE, DEFAULT_PLACEHOLDER_LINK,
    IMAGE_SIZE_KEY, INCLUDE_DIMENSIONS_KEY, PLACEHOLDER_LINK_KEY, PLACEHOLDER_PICT_KEY,
    SETTING_SUGGESTION_DISTANCE, TEMPLATE_NAME_KEY,
};

/// The three Flickr credential values. Each may be unset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub key: Option<String>,
    pub secret: Option<String>,
}

impl Credentials {
    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "TOKEN" => Some(&mut self.token),
            "KEY" => Some(&mut self.key),
            "SECRET" => Some(&mut self.secret),
            _ => None,
        }
    }
}

// Credentials never reach logs in plain text.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |value: &Option<String>| value.as_ref().map(|_| "***");
        f.debug_struct("Credentials")
            .field("token", &mask(&self.token))
            .field("key", &mask(&self.key))
            .field("secret", &mask(&self.secret))
            .finish()
    }
}

/// Image size variant requested from Flickr.
///
/// Only two aliases are recognized. Anything other than `"Medium 640"` is
/// treated as `"Medium"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    #[default]
    Medium640,
    Medium,
}

impl ImageSize {
    /// Map a configured alias to a size variant.
    #[must_use]
    pub fn from_alias(alias: &str) -> Self {
        if alias == "Medium 640" {
            Self::Medium640
        } else {
            Self::Medium
        }
    }

    /// Size label as used by `flickr.photos.getSizes`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Medium640 => "Medium 640",
            Self::Medium => "Medium",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the plugin reads from the host settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FlickrTagConfig {
    pub credentials: Credentials,
    /// `FLICKR_TAG_PLACE_HOLDER_PICT`, mandatory but not enforced
    pub placeholder_pict: Option<String>,
    /// `FLICKR_TAG_PLACE_HOLDER_LINK`
    pub placeholder_link: String,
    /// `FLICKR_TAG_CACHE_LOCATION`
    pub cache_location: PathBuf,
    /// `FLICKR_TAG_INCLUDE_DIMENSIONS`
    pub include_dimensions: bool,
    /// `FLICKR_TAG_IMAGE_SIZE`, kept verbatim
    pub image_size_alias: String,
    /// `FLICKR_TAG_TEMPLATE_NAME`
    pub template_name: Option<String>,
    /// `FLICKR_API_ENDPOINT`
    pub api_endpoint: String,
}

impl FlickrTagConfig {
    /// Read the configuration from `settings`, writing defaults back into it.
    pub fn from_settings(settings: &mut Settings) -> Self {
        let mut credentials = Credentials::default();
        for name in CREDENTIAL_NAMES {
            let key = format!("{CREDENTIAL_PREFIX}{name}");
            let value = string_setting(settings, &key);
            if value.is_none() {
                match suggest_key(settings, &key) {
                    Some(similar) => warn!(
                        "{key} is not defined in the configuration (found similar key {similar})"
                    ),
                    None => warn!("{key} is not defined in the configuration"),
                }
            }
            if let Some(slot) = credentials.slot_mut(name) {
                *slot = value;
            }
        }

        let placeholder_pict = string_setting(settings, PLACEHOLDER_PICT_KEY);
        if placeholder_pict.is_none() {
            error!("{PLACEHOLDER_PICT_KEY} variable is mandatory in your config");
        }

        let placeholder_link = match string_setting(settings, PLACEHOLDER_LINK_KEY) {
            Some(link) => link,
            None => {
                settings.insert(PLACEHOLDER_LINK_KEY, DEFAULT_PLACEHOLDER_LINK);
                warn!("{PLACEHOLDER_LINK_KEY} is set to default");
                DEFAULT_PLACEHOLDER_LINK.to_string()
            }
        };

        let default_cache = default_cache_location();
        settings.set_default(CACHE_LOCATION_KEY, default_cache.display().to_string());
        settings.set_default(INCLUDE_DIMENSIONS_KEY, false);
        settings.set_default(IMAGE_SIZE_KEY, DEFAULT_IMAGE_SIZE);

        let cache_location =
            string_setting(settings, CACHE_LOCATION_KEY).map_or(default_cache, PathBuf::from);

        let include_dimensions = match settings.get(INCLUDE_DIMENSIONS_KEY) {
            Some(value) => value.as_bool().unwrap_or_else(|| {
                warn!("{INCLUDE_DIMENSIONS_KEY} must be a boolean, got {value}; using false");
                false
            }),
            None => false,
        };

        let image_size_alias = string_setting(settings, IMAGE_SIZE_KEY)
            .unwrap_or_else(|| DEFAULT_IMAGE_SIZE.to_string());

        let template_name = string_setting(settings, TEMPLATE_NAME_KEY);

        let api_endpoint = string_setting(settings, API_ENDPOINT_KEY)
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        Self {
            credentials,
            placeholder_pict,
            placeholder_link,
            cache_location,
            include_dimensions,
            image_size_alias,
            template_name,
            api_endpoint,
        }
    }

    /// The configured size alias as a variant.
    #[must_use]
    pub fn image_size(&self) -> ImageSize {
        ImageSize::from_alias(&self.image_size_alias)
    }
}

/// `<system temp dir>/com.chrisstreeter.flickrtag-images.cache`
#[must_use]
pub fn default_cache_location() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_CACHE_FILE_NAME)
}

/// String value of `key`; a present value of another type is reported and ignored.
fn string_setting(settings: &Settings, key: &str) -> Option<String> {
    let value = settings.get(key)?;
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            warn!("{key} must be a string, got {value}");
            None
        }
    }
}

/// Setting names this crate reads, never offered as a suggestion.
const KNOWN_KEYS: [&str; 7] = [
    PLACEHOLDER_PICT_KEY,
    PLACEHOLDER_LINK_KEY,
    CACHE_LOCATION_KEY,
    INCLUDE_DIMENSIONS_KEY,
    IMAGE_SIZE_KEY,
    TEMPLATE_NAME_KEY,
    API_ENDPOINT_KEY,
];

fn is_known_key(key: &str) -> bool {
    KNOWN_KEYS.contains(&key)
        || key
            .strip_prefix(CREDENTIAL_PREFIX)
            .is_some_and(|name| CREDENTIAL_NAMES.contains(&name))
}

/// Closest existing key to `wanted`, for misspelled setting names.
fn suggest_key(settings: &Settings, wanted: &str) -> Option<String> {
    settings
        .keys()
        .filter(|key| !is_known_key(key))
        .map(|key| (key, levenshtein(&key.to_uppercase(), wanted)))
        .filter(|(_, distance)| *distance <= SETTING_SUGGESTION_DISTANCE)
        .min_by_key(|(_, distance)| *distance)
        .map(|(key, _)| key.clone())
}
