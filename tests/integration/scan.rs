use predicates::prelude::*;

use crate::common::{OFFLINE_SETTINGS, TestSite, sunset};

#[test]
fn test_scan_reports_cache_state() {
    let site = TestSite::new();
    site.fixture.write_settings(OFFLINE_SETTINGS).unwrap();
    site.fixture.write_cache(&[("12345", sunset())]).unwrap();
    site.fixture.write_article("a.md", "[flickr:id=12345] [flickr:id=12345]").unwrap();
    site.fixture.write_page("about.md", "[flickr:id=777]").unwrap();

    site.command()
        .arg("scan")
        .arg("--content")
        .arg(site.fixture.content_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("articles: 1 photo ids"))
        .stdout(predicate::str::contains("12345 (cached: Sunset)"))
        .stdout(predicate::str::contains("pages: 1 photo ids"))
        .stdout(predicate::str::contains("777 (not cached)"));

    // Scanning never writes
    assert!(!site.fixture.output_dir().exists());
}

#[test]
fn test_scan_empty_content() {
    let site = TestSite::new();
    site.fixture.write_settings("").unwrap();

    site.command()
        .arg("scan")
        .arg("--content")
        .arg(site.fixture.content_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("articles: 0 photo ids"))
        .stdout(predicate::str::contains("pages: 0 photo ids"));
}
