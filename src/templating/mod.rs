//! Rendering photo tags to HTML.
//!
//! Each tag is replaced by a fragment rendered from a Tera template. The
//! render context is every site setting (so templates can use `SITENAME`,
//! `FLICKR_TAG_INCLUDE_DIMENSIONS`, ...) overlaid with the photo's record:
//!
//! | Variable  | Value                                            |
//! |-----------|--------------------------------------------------|
//! | `title`   | Photo title, `Placeholder` for unresolved photos |
//! | `url`     | Photo page                                       |
//! | `raw_url` | Protocol-relative image URL                      |
//! | `width`   | Image width, when dimensions are included        |
//! | `height`  | Image height, when dimensions are included       |
//!
//! A site may replace the built-in template by naming one of its own in
//! `FLICKR_TAG_TEMPLATE_NAME`.

pub mod error;
pub mod renderer;

pub use error::TemplateError;
pub use renderer::{BUILTIN_TEMPLATE_NAME, PhotoRenderer};

use tera::Context as TeraContext;

use crate::config::Settings;

/// Built-in photo fragment.
pub const DEFAULT_TEMPLATE: &str = r##"<span class="caption-container">
    <a class="caption" href="{{url}}" target="_blank">
        <img src="{{raw_url}}"
            alt="{{title}}"
            title="{{title}}"
            class="img-polaroid"
            {% if FLICKR_TAG_INCLUDE_DIMENSIONS %}
                width="{{width | default(value="")}}"
                height="{{height | default(value="")}}"
            {% endif %} />
    </a>
    <span class="caption-text muted">{{title}}</span>
</span>"##;

/// Site-wide template variables built from the settings.
pub fn build_site_context(settings: &Settings) -> Result<TeraContext, TemplateError> {
    TeraContext::from_serialize(settings).map_err(|e| TemplateError::ContextError {
        message: e.to_string(),
    })
}
