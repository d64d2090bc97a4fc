//! Plugin entry points.
//!
//! The host calls three hooks per run:
//!
//! 1. [`FlickrTag::setup`] when the generator is initialized: reads the
//!    configuration (writing defaults back into the settings) and builds the
//!    Flickr client.
//! 2. [`FlickrTag::replace_article_tags`] once the articles are generated.
//! 3. [`FlickrTag::replace_page_tags`] once the pages are generated.
//!
//! Each replacement pass scans the items of its kind, fetches the photos the
//! cache does not know yet, persists the cache, and substitutes every tag in
//! place.
//!
//! ```rust,no_run
//! use flickrtag::config::Settings;
//! use flickrtag::plugin::FlickrTag;
//! use flickrtag::site::SiteGenerator;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::load(Path::new("flickrtag.toml")).await?;
//! let mut site = SiteGenerator::load(settings, Path::new("content"))?;
//!
//! let plugin = FlickrTag::setup(&mut site)?;
//! plugin.replace_article_tags(&mut site).await?;
//! plugin.replace_page_tags(&mut site).await?;
//!
//! site.write_output(Path::new("output"))?;
//! # Ok(())
//! # }
//! ```

pub mod generator;

pub use generator::Generator;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cache::PhotoCache;
use crate::config::FlickrTagConfig;
use crate::content::ContentKind;
use crate::flickr::{FlickrClient, PhotoResolver, PhotoSource, ResolverSettings};
use crate::tags::{scan_items, substitute};
use crate::templating::{PhotoRenderer, build_site_context};

/// Counts from one replacement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceSummary {
    pub kind: ContentKind,
    /// Unique photo ids referenced by the items
    pub found: usize,
    /// Ids that were not cached and had to be resolved
    pub fetched: usize,
    /// Tag occurrences replaced
    pub replaced: usize,
    /// Tag occurrences left in place
    pub unresolved: usize,
}

/// The plugin state for one run.
#[derive(Debug)]
pub struct FlickrTag<S = FlickrClient> {
    config: FlickrTagConfig,
    resolver: PhotoResolver<S>,
}

impl FlickrTag<FlickrClient> {
    /// Generator initialization hook.
    ///
    /// Missing configuration is only logged; see [`FlickrTagConfig::from_settings`].
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be created.
    pub fn setup<G: Generator + ?Sized>(generator: &mut G) -> Result<Self> {
        let config = FlickrTagConfig::from_settings(generator.settings_mut());
        let client = FlickrClient::new(&config).context("Failed to create the Flickr client")?;
        Ok(Self::with_source(config, client))
    }
}

impl<S: PhotoSource> FlickrTag<S> {
    /// Build the plugin around any photo source.
    pub fn with_source(config: FlickrTagConfig, source: S) -> Self {
        let resolver = PhotoResolver::new(source, ResolverSettings::from_config(&config));
        Self {
            config,
            resolver,
        }
    }

    pub fn config(&self) -> &FlickrTagConfig {
        &self.config
    }

    pub fn resolver(&self) -> &PhotoResolver<S> {
        &self.resolver
    }

    /// Article generator finalized hook.
    pub async fn replace_article_tags<G: Generator + ?Sized>(
        &self,
        generator: &mut G,
    ) -> Result<ReplaceSummary> {
        self.replace_tags(generator, ContentKind::Article).await
    }

    /// Page generator finalized hook.
    pub async fn replace_page_tags<G: Generator + ?Sized>(
        &self,
        generator: &mut G,
    ) -> Result<ReplaceSummary> {
        self.replace_tags(generator, ContentKind::Page).await
    }

    /// Replace the photo tags of every item of `kind`.
    ///
    /// # Errors
    ///
    /// Fails if the updated cache cannot be written or a template fails to
    /// render. Items processed before a render failure keep their new body.
    pub async fn replace_tags<G: Generator + ?Sized>(
        &self,
        generator: &mut G,
        kind: ContentKind,
    ) -> Result<ReplaceSummary> {
        info!("Parsing {} for photo ids...", kind.plural());
        let referenced = scan_items(generator.items(kind));
        info!("Found {} photo ids in the {}", referenced.len(), kind.plural());

        let mut cache = PhotoCache::load(&self.config.cache_location).await;
        let fetched = cache.update(&self.resolver, &referenced).await?;

        let renderer = PhotoRenderer::resolve(self.config.template_name.as_deref(), &*generator)?;
        let site = build_site_context(generator.context())?;

        info!("Inserting photo information into {}...", kind.plural());
        let mut replaced = 0;
        let mut unresolved = 0;
        for item in generator.items_mut(kind).iter_mut() {
            let result = substitute(&item.content, &cache, &renderer, &site).with_context(|| {
                format!("Failed to insert photos into {}", item.relative_path.display())
            })?;
            if result.replaced > 0 {
                let name = item.title().unwrap_or_else(|| item.relative_path.display().to_string());
                debug!("Inserted {} photos into {}", result.replaced, name);
            }
            replaced += result.replaced;
            unresolved += result.unresolved;
            item.content = result.content;
        }

        Ok(ReplaceSummary {
            kind,
            found: referenced.len(),
            fetched,
            replaced,
            unresolved,
        })
    }
}
