//! Command-line interface for flickrtag
//!
//! The binary plays the part of the static site generator: it loads the
//! settings and content, runs the plugin hooks, and writes the result.
//!
//! # Commands
//!
//! - `generate` - Replace photo tags in every article and page and write the site
//! - `scan` - List the photo ids referenced by the content
//! - `cache` - Inspect the photo metadata cache
//!
//! # Global Options
//!
//! - `--settings <PATH>` - Settings file (default `flickrtag.toml`, env `FLICKRTAG_SETTINGS`)
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - Errors only
//!
//! `RUST_LOG` overrides both logging flags.
//!
//! # Examples
//!
//! ```bash
//! flickrtag generate --content content --output output
//! flickrtag --settings site/flickrtag.toml scan
//! flickrtag cache show --json
//! ```

mod cache;
mod generate;
mod scan;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::{Settings, default_cache_location};
use crate::constants::CACHE_LOCATION_KEY;

/// Main CLI structure for flickrtag.
#[derive(Parser, Debug)]
#[command(
    name = "flickrtag",
    about = "Replace [flickr:id=N] tags in site content with rendered Flickr photos",
    version,
    long_about = "flickrtag scans Markdown content for [flickr:id=N] tags, resolves the photos \
                  through the Flickr API with a persistent cache, and replaces each tag with an \
                  HTML fragment rendered from a template."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file
    #[arg(
        short,
        long,
        global = true,
        env = "FLICKRTAG_SETTINGS",
        default_value = "flickrtag.toml"
    )]
    settings: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replace photo tags and write the generated site
    Generate(generate::GenerateCommand),

    /// List the photo ids referenced by the content
    Scan(scan::ScanCommand),

    /// Inspect the photo metadata cache
    Cache(cache::CacheCommand),
}

impl Cli {
    /// Install logging and run the selected command.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        match self.command {
            Commands::Generate(cmd) => cmd.execute(&self.settings).await,
            Commands::Scan(cmd) => cmd.execute(&self.settings).await,
            Commands::Cache(cmd) => cmd.execute(&self.settings).await,
        }
    }

    /// Log level implied by the flags.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }

    fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("flickrtag={}", self.log_level())));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Settings for commands that only read: a missing settings file means defaults.
async fn load_settings_or_default(path: &Path) -> Result<Settings> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        Settings::load(path).await
    } else {
        Ok(Settings::new())
    }
}

/// The configured cache file, without the side effects of full plugin setup.
fn cache_location(settings: &Settings) -> PathBuf {
    settings.get_str(CACHE_LOCATION_KEY).map_or_else(default_cache_location, PathBuf::from)
}
