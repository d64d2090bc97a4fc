//! The host interface the plugin hooks into.

use crate::config::Settings;
use crate::content::{ContentItem, ContentKind};

/// A static site generator, seen from the plugin.
///
/// The host owns the settings and the content; the plugin reads settings
/// once at setup and rewrites item bodies at the end of each generation
/// phase.
pub trait Generator {
    /// Run settings. The plugin writes its defaults back into them.
    fn settings(&self) -> &Settings;

    fn settings_mut(&mut self) -> &mut Settings;

    /// Site-wide template variables. Defaults to the settings.
    fn context(&self) -> &Settings {
        self.settings()
    }

    /// Items of one kind, in generation order.
    fn items(&self, kind: ContentKind) -> &[ContentItem];

    fn items_mut(&mut self, kind: ContentKind) -> &mut [ContentItem];

    /// Source of the named site template.
    ///
    /// # Errors
    ///
    /// Any failure to locate or read the template.
    fn get_template(&self, name: &str) -> anyhow::Result<String>;
}
