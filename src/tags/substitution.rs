//! Replacing tags with rendered fragments.

use tera::Context as TeraContext;
use tracing::error;

use super::find_tags;
use crate::cache::PhotoCache;
use crate::templating::{PhotoRenderer, TemplateError};

/// Result of substituting one body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// The body with every resolvable tag replaced
    pub content: String,
    /// Tags replaced
    pub replaced: usize,
    /// Tags left in place because their id had no record
    pub unresolved: usize,
}

/// Replace every tag in `body` whose id has a cached record.
///
/// Each occurrence is rendered on its own, so a photo used twice is rendered
/// twice. Tags without a record are logged and kept verbatim.
///
/// # Errors
///
/// Returns the first render failure; `body` is then left to the caller untouched.
pub fn substitute(
    body: &str,
    cache: &PhotoCache,
    renderer: &PhotoRenderer,
    site: &TeraContext,
) -> Result<Substitution, TemplateError> {
    let mut content = String::with_capacity(body.len());
    let mut replaced = 0;
    let mut unresolved = 0;
    let mut last = 0;

    for tag in find_tags(body) {
        content.push_str(&body[last..tag.range.start]);
        last = tag.range.end;

        match cache.get(&tag.id) {
            Some(record) => {
                content.push_str(&renderer.render(site, record)?);
                replaced += 1;
            }
            None => {
                error!("Could not find info for photo {}", tag.id);
                content.push_str(&tag.literal);
                unresolved += 1;
            }
        }
    }
    content.push_str(&body[last..]);

    Ok(Substitution {
        content,
        replaced,
        unresolved,
    })
}
