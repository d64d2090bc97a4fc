//! Inspect the photo metadata cache.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use super::{cache_location, load_settings_or_default};
use crate::cache::PhotoCache;

/// Inspect the photo metadata cache.
#[derive(Args, Debug)]
pub struct CacheCommand {
    #[command(subcommand)]
    command: CacheSubcommands,
}

#[derive(Subcommand, Debug)]
enum CacheSubcommands {
    /// Print the cached records
    Show {
        /// Print the raw JSON mapping
        #[arg(long)]
        json: bool,
    },

    /// Print the location of the cache file
    Path,
}

impl CacheCommand {
    pub async fn execute(self, settings_path: &Path) -> Result<()> {
        let settings = load_settings_or_default(settings_path).await?;
        let path = cache_location(&settings);

        match self.command {
            CacheSubcommands::Show {
                json,
            } => {
                let cache = PhotoCache::load(&path).await;
                if json {
                    println!("{}", serde_json::to_string_pretty(cache.records())?);
                    return Ok(());
                }

                println!("{} {}", "Cache:".bold(), path.display());
                for (id, record) in cache.records() {
                    let title = if record.is_placeholder() {
                        record.title.yellow().to_string()
                    } else {
                        record.title.green().to_string()
                    };
                    println!("  {id}  {title}  {}", record.raw_url.dimmed());
                }
                println!("{}: {} photos", "Total".green().bold(), cache.len());
            }
            CacheSubcommands::Path => println!("{}", path.display()),
        }
        Ok(())
    }
}
