//! Test fixtures for sample Flickr data and site layouts

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::flickr::PhotoSize;
use crate::models::PhotoRecord;

/// `getSizes` answer with `Small`, `Medium` and `Medium 640` entries.
pub fn sample_sizes(photo_id: &str) -> Vec<PhotoSize> {
    let size = |label: &str, suffix: &str, width: u32, height: u32| PhotoSize {
        label: label.to_string(),
        width,
        height,
        source: format!("https://live.staticflickr.com/65535/{photo_id}{suffix}.jpg"),
        url: format!("https://www.flickr.com/photos/someone/{photo_id}/sizes/"),
    };

    vec![
        size("Small", "_m", 240, 180),
        size("Medium", "", 500, 375),
        size("Medium 640", "_z", 640, 480),
    ]
}

/// A site laid out below `root`:
///
/// ```text
/// root/
/// ├── flickrtag.toml
/// ├── photos.cache
/// ├── content/
/// │   └── pages/
/// ├── templates/
/// └── output/
/// ```
#[derive(Debug, Clone)]
pub struct SiteFixture {
    root: PathBuf,
}

impl SiteFixture {
    /// Create the directory skeleton below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let fixture = Self {
            root: root.into(),
        };
        fs::create_dir_all(fixture.content_dir().join("pages"))
            .context("Failed to create content directory")?;
        fs::create_dir_all(fixture.templates_dir()).context("Failed to create templates directory")?;
        Ok(fixture)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root.join("content")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join("templates")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join("output")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join("flickrtag.toml")
    }

    pub fn cache_path(&self) -> PathBuf {
        self.root.join("photos.cache")
    }

    /// Write an article below `content/`.
    pub fn write_article(&self, relative: &str, text: &str) -> Result<PathBuf> {
        write_file(&self.content_dir().join(relative), text)
    }

    /// Write a page below `content/pages/`.
    pub fn write_page(&self, relative: &str, text: &str) -> Result<PathBuf> {
        write_file(&self.content_dir().join("pages").join(relative), text)
    }

    pub fn write_template(&self, name: &str, text: &str) -> Result<PathBuf> {
        write_file(&self.templates_dir().join(name), text)
    }

    /// Write `flickrtag.toml` pointing the cache at [`cache_path`](Self::cache_path),
    /// followed by `extra` lines.
    pub fn write_settings(&self, extra: &str) -> Result<PathBuf> {
        let cache = self.cache_path().display().to_string().replace('\\', "/");
        let text = format!(
            "SITENAME = \"Fixture site\"\n\
             FLICKR_TAG_PLACE_HOLDER_PICT = \"//example.com/placeholder.png\"\n\
             FLICKR_TAG_CACHE_LOCATION = \"{cache}\"\n\
             {extra}\n"
        );
        write_file(&self.settings_path(), &text)
    }

    /// Pre-fill the cache file with `records`.
    pub fn write_cache(&self, records: &[(&str, PhotoRecord)]) -> Result<PathBuf> {
        let map: std::collections::BTreeMap<&str, &PhotoRecord> =
            records.iter().map(|(id, record)| (*id, record)).collect();
        let text = serde_json::to_string_pretty(&map).context("Failed to serialize cache")?;
        write_file(&self.cache_path(), &text)
    }

    /// Read a generated file below `output/`.
    pub fn read_output(&self, relative: &str) -> Result<String> {
        let path = self.output_dir().join(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn write_file(path: &Path, text: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}
