//! Content items handed to the plugin by the host.
//!
//! A [`ContentItem`] is one Markdown source file: an optional YAML frontmatter
//! block followed by a body. The plugin only ever touches the body
//! ([`ContentItem::content`]); the frontmatter block is kept verbatim so the
//! item can be written back out unchanged apart from the substituted tags.
//!
//! ```rust,no_run
//! use flickrtag::content::ContentItem;
//! use std::path::Path;
//!
//! let item = ContentItem::parse(
//!     "---\ntitle: Trip\n---\nSee [flickr:id=12345] here\n",
//!     Path::new("trip.md"),
//! );
//! assert_eq!(item.title().as_deref(), Some("Trip"));
//! assert_eq!(item.content, "See [flickr:id=12345] here\n");
//! ```

use anyhow::Result;
use gray_matter::{Matter, engine::YAML};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::core::FlickrTagError;

/// The two content collections a generator finalizes separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Article,
    Page,
}

impl ContentKind {
    /// Singular name, as used in log messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Page => "page",
        }
    }

    /// Plural name.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Article => "articles",
            Self::Page => "pages",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of site content with a mutable body.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    /// Path relative to the content root; output files keep the same layout.
    pub relative_path: PathBuf,

    /// The raw frontmatter block including its `---` delimiters, if any.
    pub frontmatter: Option<String>,

    /// Parsed frontmatter.
    pub metadata: Option<serde_yaml::Value>,

    /// The body. Photo tags are replaced in here.
    pub content: String,
}

impl ContentItem {
    /// An item without frontmatter.
    #[must_use]
    pub fn new(relative_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            frontmatter: None,
            metadata: None,
            content: content.into(),
        }
    }

    /// Read and parse a file below `root`.
    ///
    /// # Errors
    ///
    /// Returns [`FlickrTagError::ContentReadError`] if the file cannot be read.
    pub fn read(path: &Path, root: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| FlickrTagError::ContentReadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let relative = path.strip_prefix(root).unwrap_or(path);
        Ok(Self::parse(&raw, relative))
    }

    /// Split `raw` into frontmatter and body.
    ///
    /// The body is everything after the closing `---` line, byte for byte.
    /// Malformed frontmatter is reported and the whole input becomes the body.
    #[must_use]
    pub fn parse(raw: &str, relative_path: &Path) -> Self {
        let Some(end) = frontmatter_end(raw) else {
            return Self::new(relative_path, raw);
        };
        let (block, body) = raw.split_at(end);

        match Matter::<YAML>::new().parse::<serde_yaml::Value>(block) {
            Ok(parsed) => Self {
                relative_path: relative_path.to_path_buf(),
                frontmatter: Some(block.to_string()),
                metadata: parsed.data,
                content: body.to_string(),
            },
            Err(e) => {
                warn!(
                    "Unable to parse frontmatter of {}, treating it as content: {}",
                    relative_path.display(),
                    e
                );
                Self::new(relative_path, raw)
            }
        }
    }

    /// `title` from the frontmatter, if present.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.metadata.as_ref()?.get("title")?.as_str().map(str::to_string)
    }

    /// Frontmatter block followed by the current body.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.frontmatter {
            Some(frontmatter) => format!("{frontmatter}{}", self.content),
            None => self.content.clone(),
        }
    }

    /// Write the rendered item below `output_root`, creating directories.
    ///
    /// # Errors
    ///
    /// Returns [`FlickrTagError::OutputWriteError`] on any I/O failure.
    pub fn write_to(&self, output_root: &Path) -> Result<PathBuf> {
        let target = output_root.join(&self.relative_path);
        let write = || -> std::io::Result<()> {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, self.render())
        };
        write().map_err(|e| FlickrTagError::OutputWriteError {
            path: target.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(target)
    }
}

/// Byte offset just past the closing `---` line of a leading frontmatter block.
fn frontmatter_end(raw: &str) -> Option<usize> {
    let mut lines = raw.split_inclusive('\n');
    if lines.next()?.trim_end() != "---" {
        return None;
    }

    let mut pos = raw.find('\n')? + 1;
    for line in lines {
        pos += line.len();
        if line.trim_end() == "---" {
            return Some(pos);
        }
    }
    None
}

/// Check if a path has a Markdown extension.
#[must_use]
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

/// Recursively list Markdown files below `dir`, sorted, skipping any path
/// that starts with one of `excluded`.
///
/// A missing directory yields an empty list.
pub fn list_content_files(dir: &Path, excluded: &[PathBuf]) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.is_file() && is_markdown_file(path))
        .filter(|path| !excluded.iter().any(|skip| path.starts_with(skip)))
        .collect();

    files.sort();
    files
}
