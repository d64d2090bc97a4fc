use predicates::prelude::*;
use std::fs;

use crate::common::{OFFLINE_SETTINGS, TestSite, sunset};

#[test]
fn test_generate_without_settings_file() {
    let site = TestSite::new();

    site.generate()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Settings file not found"))
        .stderr(predicate::str::contains("FLICKRTAG_SETTINGS"));
}

#[test]
fn test_generate_with_invalid_settings() {
    let site = TestSite::new();
    fs::write(site.fixture.settings_path(), "FLICKR_API_KEY = [unclosed").unwrap();

    site.generate()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid settings file syntax"));
}

#[test]
fn test_unwritable_cache_is_fatal() {
    let site = TestSite::new();
    let blocker = site.fixture.root().join("blocker");
    fs::write(&blocker, "").unwrap();
    let cache = blocker.join("photos.cache").display().to_string().replace('\\', "/");
    fs::write(
        site.fixture.settings_path(),
        format!("FLICKR_TAG_PLACE_HOLDER_PICT = \"//x/ph.png\"\nFLICKR_TAG_CACHE_LOCATION = \"{cache}\"\n"),
    )
    .unwrap();
    site.fixture.write_article("a.md", "[flickr:id=1]").unwrap();

    site.generate()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to persist photo cache"));

    assert!(!site.fixture.output_dir().join("a.md").exists());
}

#[test]
fn test_custom_template_with_unknown_variable_fails() {
    let site = TestSite::new();
    site.fixture
        .write_settings(&format!("{OFFLINE_SETTINGS}\nFLICKR_TAG_TEMPLATE_NAME = \"flickr.html\""))
        .unwrap();
    site.fixture.write_cache(&[("12345", sunset())]).unwrap();
    site.fixture.write_template("flickr.html", "{{ titel }}").unwrap();
    site.fixture.write_article("a.md", "[flickr:id=12345]").unwrap();

    site.generate()
        .assert()
        .failure()
        .stderr(predicate::str::contains("titel"))
        .stderr(predicate::str::contains("Did you mean: title?"));
}
