//! In-memory [`PhotoSource`] for tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::flickr::{FlickrError, PhotoInfo, PhotoSize, PhotoSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Info,
    Sizes,
}

/// Answers from a fixed table of photos; unknown ids fail like Flickr does
/// (`stat: fail`, code 1).
#[derive(Debug, Default)]
pub struct MockPhotoSource {
    photos: HashMap<String, (PhotoInfo, Vec<PhotoSize>)>,
    calls: Mutex<Vec<(Method, String)>>,
}

impl MockPhotoSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a photo.
    #[must_use]
    pub fn with_photo(mut self, photo_id: &str, title: &str, url: &str, sizes: Vec<PhotoSize>) -> Self {
        let info = PhotoInfo {
            id: photo_id.to_string(),
            title: title.to_string(),
            url: url.to_string(),
        };
        self.photos.insert(photo_id.to_string(), (info, sizes));
        self
    }

    /// Total number of calls of either kind.
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    /// Number of `photo_info` calls for `photo_id`.
    pub fn info_calls(&self, photo_id: &str) -> usize {
        self.count(Method::Info, photo_id)
    }

    /// Number of `photo_sizes` calls for `photo_id`.
    pub fn sizes_calls(&self, photo_id: &str) -> usize {
        self.count(Method::Sizes, photo_id)
    }

    fn count(&self, method: Method, photo_id: &str) -> usize {
        self.calls().iter().filter(|(m, id)| *m == method && id == photo_id).count()
    }

    fn calls(&self) -> std::sync::MutexGuard<'_, Vec<(Method, String)>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self, method: Method, photo_id: &str) -> Result<&(PhotoInfo, Vec<PhotoSize>), FlickrError> {
        self.calls().push((method, photo_id.to_string()));
        self.photos.get(photo_id).ok_or_else(|| FlickrError::Api {
            code: 1,
            message: format!("Photo \"{photo_id}\" not found (invalid ID)"),
        })
    }
}

impl PhotoSource for MockPhotoSource {
    async fn photo_info(&self, photo_id: &str) -> Result<PhotoInfo, FlickrError> {
        self.lookup(Method::Info, photo_id).map(|(info, _)| info.clone())
    }

    async fn photo_sizes(&self, photo_id: &str) -> Result<Vec<PhotoSize>, FlickrError> {
        self.lookup(Method::Sizes, photo_id).map(|(_, sizes)| sizes.clone())
    }
}
