//! Photo tags in content bodies.
//!
//! A photo is referenced as `[flickr:id=<digits>]`. There is no escaping: any
//! text matching that pattern is a tag.
//!
//! - [`scan_items`] collects the ids a set of items needs
//! - [`substitute`] replaces the tags of one body with rendered fragments

pub mod scanner;
pub mod substitution;

pub use scanner::{PhotoTag, find_tags, scan_items};
pub use substitution::{Substitution, substitute};
