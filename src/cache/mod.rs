//! Persistent photo metadata cache.
//!
//! Resolving a photo costs two Flickr requests, so resolved records are kept
//! in a flat file between generation runs and only ids that have never been
//! seen are fetched.
//!
//! # File Format
//!
//! A pretty-printed JSON object keyed by photo id:
//!
//! ```json
//! {
//!   "12345": {
//!     "title": "Sunset",
//!     "raw_url": "//live.staticflickr.com/65535/12345_z.jpg",
//!     "url": "https://www.flickr.com/photos/someone/12345/"
//!   }
//! }
//! ```
//!
//! # Lifecycle
//!
//! 1. [`PhotoCache::load`] reads the file. A missing, empty, or undecodable
//!    file is an empty cache, never an error.
//! 2. [`PhotoCache::missing`] computes the referenced ids not yet cached.
//! 3. [`PhotoCache::fetch_missing`] resolves those ids one at a time.
//! 4. [`PhotoCache::save`] writes the whole mapping back.
//!
//! [`PhotoCache::update`] runs steps 2-4 and only writes when something was
//! missing. Records are never evicted or refreshed: a photo that resolved to
//! the placeholder stays a placeholder until the cache file is removed.
//!
//! There is no locking. Two runs sharing one cache file race and the last
//! writer wins.

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::core::FlickrTagError;
use crate::flickr::{PhotoResolver, PhotoSource};
use crate::models::PhotoRecord;

/// Photo id to record mapping bound to its backing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoCache {
    path: PathBuf,
    records: BTreeMap<String, PhotoRecord>,
}

impl PhotoCache {
    /// An empty cache that will persist to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: BTreeMap::new(),
        }
    }

    /// Load the cache stored at `path`.
    pub async fn load(path: &Path) -> Self {
        let mut cache = Self::new(path);

        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                debug!("No photo cache loaded from {}: {}", path.display(), e);
                return cache;
            }
        };

        if content.trim().is_empty() {
            debug!("Photo cache {} is empty", path.display());
            return cache;
        }

        match serde_json::from_str(&content) {
            Ok(records) => {
                cache.records = records;
                debug!("Loaded {} cached photos from {}", cache.records.len(), path.display());
            }
            Err(e) => {
                warn!("Ignoring unreadable photo cache {}: {}", path.display(), e);
            }
        }
        cache
    }

    /// The file this cache persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, photo_id: &str) -> Option<&PhotoRecord> {
        self.records.get(photo_id)
    }

    pub fn contains(&self, photo_id: &str) -> bool {
        self.records.contains_key(photo_id)
    }

    /// Insert or replace a record, returning the previous one.
    pub fn insert(&mut self, photo_id: impl Into<String>, record: PhotoRecord) -> Option<PhotoRecord> {
        self.records.insert(photo_id.into(), record)
    }

    /// All records, ordered by id.
    pub fn records(&self) -> &BTreeMap<String, PhotoRecord> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Referenced ids that have no record yet.
    pub fn missing(&self, referenced: &BTreeSet<String>) -> BTreeSet<String> {
        referenced.iter().filter(|id| !self.records.contains_key(*id)).cloned().collect()
    }

    /// Resolve every id in `missing` and store the results.
    ///
    /// Resolution never fails; unresolvable ids are stored as placeholders.
    /// Returns the number of records inserted.
    pub async fn fetch_missing<S: PhotoSource>(
        &mut self,
        resolver: &PhotoResolver<S>,
        missing: &BTreeSet<String>,
    ) -> usize {
        for photo_id in missing {
            info!("Fetching photo information for {}", photo_id);
            let record = resolver.resolve(photo_id).await;
            self.records.insert(photo_id.clone(), record);
        }
        missing.len()
    }

    /// Write the full mapping to [`path`](Self::path), creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`FlickrTagError::CachePersistFailed`] on any serialization or I/O failure.
    pub async fn save(&self) -> Result<()> {
        let persist_failed = |reason: String| FlickrTagError::CachePersistFailed {
            path: self.path.display().to_string(),
            reason,
        };

        let content =
            serde_json::to_string_pretty(&self.records).map_err(|e| persist_failed(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.map_err(|e| persist_failed(e.to_string()))?;
        }

        fs::write(&self.path, content).await.map_err(|e| persist_failed(e.to_string()))?;
        debug!("Saved {} photos to {}", self.records.len(), self.path.display());
        Ok(())
    }

    /// Fetch the referenced ids that are not cached yet and persist the result.
    ///
    /// Nothing is fetched or written when every referenced id is already
    /// cached. Returns the number of ids fetched.
    ///
    /// # Errors
    ///
    /// Propagates [`save`](Self::save) failures.
    pub async fn update<S: PhotoSource>(
        &mut self,
        resolver: &PhotoResolver<S>,
        referenced: &BTreeSet<String>,
    ) -> Result<usize> {
        let missing = self.missing(referenced);
        if missing.is_empty() {
            info!("Found cached photo mapping");
            return Ok(0);
        }

        info!("Fetching photo information from Flickr...");
        let fetched = self.fetch_missing(resolver, &missing).await;

        info!("Saving photo information to the cache...");
        self.save().await?;
        Ok(fetched)
    }
}
