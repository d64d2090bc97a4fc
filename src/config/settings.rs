//! Host settings store.
//!
//! Settings are a flat map of upper-case keys to arbitrary values, read from a
//! TOML file. Every key doubles as a site-wide template variable, so the map is
//! kept as JSON values that serialize straight into a Tera context.
//!
//! ```toml
//! SITENAME = "Holiday photos"
//! FLICKR_API_KEY = "0123456789abcdef"
//! FLICKR_TAG_PLACE_HOLDER_PICT = "//example.com/missing.png"
//! FLICKR_TAG_INCLUDE_DIMENSIONS = true
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

use crate::core::FlickrTagError;

/// Key/value settings of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: Map<String, Value>,
}

impl Settings {
    /// Create an empty settings store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FlickrTagError::SettingsNotFound`] when the file does not exist
    /// and [`FlickrTagError::SettingsParseError`] when it is not valid TOML.
    pub async fn load(path: &Path) -> Result<Self> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            return Err(FlickrTagError::SettingsNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path).await.map_err(|e| FlickrTagError::ContentReadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|reason| {
            FlickrTagError::SettingsParseError {
                file: path.display().to_string(),
                reason,
            }
            .into()
        })
    }

    /// Parse settings from TOML text.
    ///
    /// Returns the parser message on failure.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, String> {
        let table: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;
        match serde_json::to_value(table).map_err(|e| e.to_string())? {
            Value::Object(values) => Ok(Self {
                values,
            }),
            _ => Err("settings must be a table of keys".to_string()),
        }
    }

    /// Raw value of a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value of a key, `None` when absent or not a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Boolean value of a key, `None` when absent or not a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Insert a value only if the key is absent. Returns the value now stored.
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) -> &Value {
        self.values.entry(key.to_string()).or_insert_with(|| value.into())
    }

    /// Iterate over all keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(values: Map<String, Value>) -> Self {
        Self {
            values,
        }
    }
}
