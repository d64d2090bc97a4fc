//! Run the plugin over a content tree and write the result.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::plugin::{FlickrTag, ReplaceSummary};
use crate::site::SiteGenerator;

/// Replace photo tags and write the generated site.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Content root; pages live in its `pages/` directory
    #[arg(long, default_value = "content")]
    content: PathBuf,

    /// Where the processed files are written
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Directory searched for FLICKR_TAG_TEMPLATE_NAME
    #[arg(long, default_value = "templates")]
    templates: PathBuf,
}

impl GenerateCommand {
    pub async fn execute(self, settings_path: &Path) -> Result<()> {
        let settings = Settings::load(settings_path).await?;
        let mut site = SiteGenerator::load(settings, &self.content)?.with_templates_dir(&self.templates);

        let plugin = FlickrTag::setup(&mut site)?;
        let articles = plugin.replace_article_tags(&mut site).await?;
        let pages = plugin.replace_page_tags(&mut site).await?;

        let written = site.write_output(&self.output)?;

        print_summary(&articles);
        print_summary(&pages);
        println!(
            "{} {} files to {}",
            "Wrote".green().bold(),
            written.len(),
            self.output.display()
        );
        Ok(())
    }
}

fn print_summary(summary: &ReplaceSummary) {
    let mut line = format!(
        "{}: {} photos, {} fetched, {} tags replaced",
        summary.kind.plural().cyan().bold(),
        summary.found,
        summary.fetched,
        summary.replaced
    );
    if summary.unresolved > 0 {
        line.push_str(&format!(", {}", format!("{} unresolved", summary.unresolved).yellow()));
    }
    println!("{line}");
}
