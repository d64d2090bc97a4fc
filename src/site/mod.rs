//! A minimal file-based site host.
//!
//! [`SiteGenerator`] gives the plugin the same environment a static site
//! generator would: settings, the content split into articles and pages, and
//! a templates directory. Layout below the content root:
//!
//! ```text
//! content/
//! ├── 2024/trip.md        # article
//! ├── hello.md            # article
//! └── pages/
//!     └── about.md        # page
//! ```

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Settings;
use crate::content::{ContentItem, ContentKind, list_content_files};
use crate::plugin::Generator;

/// Directory below the content root that holds pages.
pub const PAGES_DIR: &str = "pages";

/// Settings plus in-memory content.
#[derive(Debug, Clone, Default)]
pub struct SiteGenerator {
    settings: Settings,
    articles: Vec<ContentItem>,
    pages: Vec<ContentItem>,
    templates_dir: Option<PathBuf>,
}

impl SiteGenerator {
    /// A site without content.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Read every Markdown file below `content_dir`.
    ///
    /// Files under `content_dir/pages` are pages, everything else is an
    /// article. A missing content directory yields an empty site.
    ///
    /// # Errors
    ///
    /// Fails if a content file cannot be read.
    pub fn load(settings: Settings, content_dir: &Path) -> Result<Self> {
        let mut site = Self::new(settings);
        let pages_dir = content_dir.join(PAGES_DIR);

        for path in list_content_files(content_dir, std::slice::from_ref(&pages_dir)) {
            site.articles.push(ContentItem::read(&path, content_dir)?);
        }
        for path in list_content_files(&pages_dir, &[]) {
            site.pages.push(ContentItem::read(&path, content_dir)?);
        }

        debug!(
            "Loaded {} articles and {} pages from {}",
            site.articles.len(),
            site.pages.len(),
            content_dir.display()
        );
        Ok(site)
    }

    /// Look templates up below `dir`.
    #[must_use]
    pub fn with_templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates_dir = Some(dir.into());
        self
    }

    pub fn push_item(&mut self, kind: ContentKind, item: ContentItem) {
        match kind {
            ContentKind::Article => self.articles.push(item),
            ContentKind::Page => self.pages.push(item),
        }
    }

    /// Write every item below `output_dir`, keeping relative paths.
    ///
    /// # Errors
    ///
    /// Fails on the first item that cannot be written.
    pub fn write_output(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        self.articles.iter().chain(&self.pages).map(|item| item.write_to(output_dir)).collect()
    }
}

impl Generator for SiteGenerator {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    fn items(&self, kind: ContentKind) -> &[ContentItem] {
        match kind {
            ContentKind::Article => &self.articles,
            ContentKind::Page => &self.pages,
        }
    }

    fn items_mut(&mut self, kind: ContentKind) -> &mut [ContentItem] {
        match kind {
            ContentKind::Article => &mut self.articles,
            ContentKind::Page => &mut self.pages,
        }
    }

    fn get_template(&self, name: &str) -> Result<String> {
        let Some(dir) = &self.templates_dir else {
            bail!("No templates directory configured");
        };
        let path = dir.join(name);
        fs::read_to_string(&path).with_context(|| format!("Failed to read template {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_splits_articles_and_pages() {
        let temp = tempdir().unwrap();
        let content = temp.path();
        fs::create_dir_all(content.join("pages")).unwrap();
        fs::create_dir_all(content.join("2024")).unwrap();
        fs::write(content.join("hello.md"), "Hello [flickr:id=1]").unwrap();
        fs::write(content.join("2024/trip.md"), "---\ntitle: Trip\n---\nTrip").unwrap();
        fs::write(content.join("pages/about.md"), "About").unwrap();

        let site = SiteGenerator::load(Settings::new(), content).unwrap();

        let articles: Vec<_> = site.items(ContentKind::Article).iter().map(|i| i.relative_path.clone()).collect();
        assert_eq!(articles, vec![PathBuf::from("2024/trip.md"), PathBuf::from("hello.md")]);

        let pages = site.items(ContentKind::Page);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].relative_path, PathBuf::from("pages/about.md"));
    }

    #[test]
    fn test_load_missing_content_dir() {
        let temp = tempdir().unwrap();
        let site = SiteGenerator::load(Settings::new(), &temp.path().join("content")).unwrap();
        assert!(site.items(ContentKind::Article).is_empty());
        assert!(site.items(ContentKind::Page).is_empty());
    }

    #[test]
    fn test_get_template() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("flickr.html"), "{{ title }}").unwrap();

        let site = SiteGenerator::new(Settings::new()).with_templates_dir(temp.path());
        assert_eq!(site.get_template("flickr.html").unwrap(), "{{ title }}");
        assert!(site.get_template("other.html").is_err());
        assert!(SiteGenerator::new(Settings::new()).get_template("flickr.html").is_err());
    }

    #[test]
    fn test_write_output() {
        let temp = tempdir().unwrap();
        let mut site = SiteGenerator::new(Settings::new());
        site.push_item(ContentKind::Article, ContentItem::new("a.md", "A"));
        site.push_item(ContentKind::Page, ContentItem::new("pages/b.md", "B"));

        let written = site.write_output(temp.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(fs::read_to_string(temp.path().join("pages/b.md")).unwrap(), "B");
    }

    #[test]
    fn test_context_defaults_to_settings() {
        let mut settings = Settings::new();
        settings.insert("SITENAME", "Holiday");
        let site = SiteGenerator::new(settings);
        assert_eq!(site.context().get_str("SITENAME"), Some("Holiday"));
    }
}
