//! Finding `[flickr:id=N]` tags in content.

use regex::Regex;
use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::LazyLock;

use crate::content::ContentItem;

// Literal syntax only: no whitespace, no other attributes.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[flickr:id=([0-9]+)\]").expect("tag pattern is valid"));

/// One tag occurrence in a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoTag {
    /// The full tag text, e.g. `[flickr:id=12345]`
    pub literal: String,
    /// The photo id, e.g. `12345`
    pub id: String,
    /// Byte range of `literal` in the scanned text
    pub range: Range<usize>,
}

/// All tags in `text`, in order of appearance.
pub fn find_tags(text: &str) -> Vec<PhotoTag> {
    TAG_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let id = caps.get(1)?;
            Some(PhotoTag {
                literal: whole.as_str().to_string(),
                id: id.as_str().to_string(),
                range: whole.range(),
            })
        })
        .collect()
}

/// Unique photo ids referenced anywhere in `items`.
pub fn scan_items(items: &[ContentItem]) -> BTreeSet<String> {
    items.iter().flat_map(|item| find_tags(&item.content)).map(|tag| tag.id).collect()
}
