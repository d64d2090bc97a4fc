//! List referenced photo ids without touching the network.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::{cache_location, load_settings_or_default};
use crate::cache::PhotoCache;
use crate::content::ContentKind;
use crate::plugin::Generator;
use crate::site::SiteGenerator;
use crate::tags::scan_items;

/// List the photo ids referenced by the content.
#[derive(Args, Debug)]
pub struct ScanCommand {
    /// Content root; pages live in its `pages/` directory
    #[arg(long, default_value = "content")]
    content: PathBuf,
}

impl ScanCommand {
    pub async fn execute(self, settings_path: &Path) -> Result<()> {
        let settings = load_settings_or_default(settings_path).await?;
        let cache = PhotoCache::load(&cache_location(&settings)).await;
        let site = SiteGenerator::load(settings, &self.content)?;

        for kind in [ContentKind::Article, ContentKind::Page] {
            let ids = scan_items(site.items(kind));
            println!("{}: {} photo ids", kind.plural().cyan().bold(), ids.len());
            for id in &ids {
                match cache.get(id) {
                    Some(record) => println!("  {} {}", id, format!("(cached: {})", record.title).dimmed()),
                    None => println!("  {} {}", id, "(not cached)".yellow()),
                }
            }
        }
        Ok(())
    }
}
