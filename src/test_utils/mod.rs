//! Test utilities for flickrtag
//!
//! Available to unit tests and, through the `test-utils` feature, to
//! integration tests.
//!
//! - [`MockPhotoSource`]: a scripted [`PhotoSource`](crate::flickr::PhotoSource)
//!   that records every call, so tests can assert that cached ids never hit
//!   the network
//! - [`SiteFixture`]: writes a content tree, templates, settings and a
//!   pre-filled cache below a directory owned by the test
//! - [`sample_sizes`]: a realistic `getSizes` answer
//!
//! # Example
//!
//! ```rust,ignore
//! use flickrtag::test_utils::{MockPhotoSource, sample_sizes};
//!
//! let source = MockPhotoSource::new().with_photo(
//!     "12345",
//!     "Sunset",
//!     "https://www.flickr.com/photos/someone/12345/",
//!     sample_sizes("12345"),
//! );
//! assert_eq!(source.call_count(), 0);
//! ```

pub mod fixtures;
pub mod mock;

pub use fixtures::{SiteFixture, sample_sizes};
pub use mock::MockPhotoSource;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `None`, logging is enabled only
/// when `RUST_LOG` is set.
///
/// ```bash
/// RUST_LOG=flickrtag=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
