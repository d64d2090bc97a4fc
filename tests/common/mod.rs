//! Shared helpers for the integration tests.

use assert_cmd::Command;
use flickrtag::models::PhotoRecord;
use flickrtag::test_utils::SiteFixture;
use tempfile::TempDir;

/// A temporary site directory and its layout.
pub struct TestSite {
    // Dropped last; removes the directory.
    _temp: TempDir,
    pub fixture: SiteFixture,
}

impl TestSite {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let fixture = SiteFixture::new(temp.path()).unwrap();
        Self {
            _temp: temp,
            fixture,
        }
    }

    /// The binary, pointed at this site's settings, with a clean environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("flickrtag").unwrap();
        cmd.current_dir(self.fixture.root())
            .env_remove("RUST_LOG")
            .env_remove("FLICKRTAG_SETTINGS")
            .env("NO_COLOR", "1")
            .arg("--settings")
            .arg(self.fixture.settings_path());
        cmd
    }

    /// `generate` with the fixture's content, output and templates directories.
    pub fn generate(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("generate")
            .arg("--content")
            .arg(self.fixture.content_dir())
            .arg("--output")
            .arg(self.fixture.output_dir())
            .arg("--templates")
            .arg(self.fixture.templates_dir());
        cmd
    }
}

pub fn sunset() -> PhotoRecord {
    PhotoRecord::new(
        "Sunset",
        "//live.staticflickr.com/65535/12345_z.jpg",
        "https://www.flickr.com/photos/someone/12345/",
    )
}

pub fn harbour() -> PhotoRecord {
    PhotoRecord::new(
        "Harbour",
        "//live.staticflickr.com/65535/777_z.jpg",
        "https://www.flickr.com/photos/someone/777/",
    )
}

/// Settings with a key but an unreachable endpoint: any request would fail.
pub const OFFLINE_SETTINGS: &str = "FLICKR_API_KEY = \"test-key\"\n\
                                    FLICKR_API_ENDPOINT = \"http://127.0.0.1:9/\"";
