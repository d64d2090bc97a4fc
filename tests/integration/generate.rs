use predicates::prelude::*;
use std::fs;

use crate::common::{OFFLINE_SETTINGS, TestSite, harbour, sunset};

#[test]
fn test_generate_fully_cached_site() {
    let site = TestSite::new();
    site.fixture.write_settings(OFFLINE_SETTINGS).unwrap();
    site.fixture.write_cache(&[("12345", sunset()), ("777", harbour())]).unwrap();
    let cache_before = fs::read_to_string(site.fixture.cache_path()).unwrap();

    site.fixture
        .write_article("2024/trip.md", "---\ntitle: Trip\n---\nSee [flickr:id=12345] here\n")
        .unwrap();
    site.fixture.write_page("about.md", "[flickr:id=777]\n").unwrap();

    site.generate()
        .assert()
        .success()
        .stdout(predicate::str::contains("1 photos, 0 fetched, 1 tags replaced"))
        .stdout(predicate::str::contains("Wrote 2 files"));

    let article = site.fixture.read_output("2024/trip.md").unwrap();
    assert!(article.starts_with("---\ntitle: Trip\n---\nSee <span class=\"caption-container\">"));
    assert!(article.contains("alt=\"Sunset\""));
    assert!(article.contains("src=\"//live.staticflickr.com/65535/12345_z.jpg\""));
    assert!(article.ends_with("</span> here\n"));
    assert!(!article.contains("[flickr:id="));

    let page = site.fixture.read_output("pages/about.md").unwrap();
    assert!(page.contains("alt=\"Harbour\""));

    // Nothing was missing, so the cache is not rewritten
    assert_eq!(fs::read_to_string(site.fixture.cache_path()).unwrap(), cache_before);
}

#[test]
fn test_generate_without_api_key_uses_placeholder() {
    let site = TestSite::new();
    site.fixture.write_settings("").unwrap();
    site.fixture.write_article("post.md", "[flickr:id=42] and [flickr:id=42]\n").unwrap();

    site.generate()
        .assert()
        .success()
        .stdout(predicate::str::contains("1 photos, 1 fetched, 2 tags replaced"));

    let post = site.fixture.read_output("post.md").unwrap();
    assert_eq!(post.matches("alt=\"Placeholder\"").count(), 2);
    assert!(post.contains("src=\"//example.com/placeholder.png\""));
    assert!(post.contains("href=\"https://github.com/haum/pelican-flickrtag\""));

    let cache: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(site.fixture.cache_path()).unwrap()).unwrap();
    assert_eq!(cache["42"]["title"], "Placeholder");
}

#[test]
fn test_generate_with_custom_template() {
    let site = TestSite::new();
    site.fixture
        .write_settings(&format!("{OFFLINE_SETTINGS}\nFLICKR_TAG_TEMPLATE_NAME = \"flickr.html\""))
        .unwrap();
    site.fixture.write_cache(&[("12345", sunset())]).unwrap();
    site.fixture
        .write_template("flickr.html", "<figure><img src=\"{{ raw_url }}\"><figcaption>{{ title }} - {{ SITENAME }}</figcaption></figure>")
        .unwrap();
    site.fixture.write_article("a.md", "[flickr:id=12345]").unwrap();

    site.generate().assert().success();

    assert_eq!(
        site.fixture.read_output("a.md").unwrap(),
        "<figure><img src=\"//live.staticflickr.com/65535/12345_z.jpg\"><figcaption>Sunset - Fixture site</figcaption></figure>"
    );
}

#[test]
fn test_generate_missing_custom_template_falls_back() {
    let site = TestSite::new();
    site.fixture
        .write_settings(&format!("{OFFLINE_SETTINGS}\nFLICKR_TAG_TEMPLATE_NAME = \"nowhere.html\""))
        .unwrap();
    site.fixture.write_cache(&[("12345", sunset())]).unwrap();
    site.fixture.write_article("a.md", "[flickr:id=12345]").unwrap();

    site.generate()
        .assert()
        .success()
        .stderr(predicate::str::contains("Unable to find the custom template nowhere.html"));

    assert!(site.fixture.read_output("a.md").unwrap().contains("caption-container"));
}

#[test]
fn test_generate_with_dimensions() {
    let site = TestSite::new();
    site.fixture
        .write_settings(&format!("{OFFLINE_SETTINGS}\nFLICKR_TAG_INCLUDE_DIMENSIONS = true"))
        .unwrap();
    site.fixture.write_cache(&[("12345", sunset().with_dimensions(640, 427))]).unwrap();
    site.fixture.write_article("a.md", "[flickr:id=12345]").unwrap();

    site.generate().assert().success();

    let article = site.fixture.read_output("a.md").unwrap();
    assert!(article.contains("width=\"640\""));
    assert!(article.contains("height=\"427\""));
}

#[test]
fn test_generate_content_without_tags_is_copied() {
    let site = TestSite::new();
    site.fixture.write_settings(OFFLINE_SETTINGS).unwrap();
    site.fixture.write_article("plain.md", "---\ntitle: Plain\n---\nNo photos here.\n").unwrap();

    site.generate().assert().success();

    assert_eq!(
        site.fixture.read_output("plain.md").unwrap(),
        "---\ntitle: Plain\n---\nNo photos here.\n"
    );
    assert!(!site.fixture.cache_path().exists());
}
