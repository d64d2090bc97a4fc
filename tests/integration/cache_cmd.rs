use predicates::prelude::*;

use crate::common::{TestSite, harbour, sunset};

#[test]
fn test_cache_show() {
    let site = TestSite::new();
    site.fixture.write_settings("").unwrap();
    site.fixture.write_cache(&[("12345", sunset()), ("777", harbour())]).unwrap();

    site.command()
        .args(["cache", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12345  Sunset"))
        .stdout(predicate::str::contains("777  Harbour"))
        .stdout(predicate::str::contains("Total: 2 photos"));
}

#[test]
fn test_cache_show_json() {
    let site = TestSite::new();
    site.fixture.write_settings("").unwrap();
    site.fixture.write_cache(&[("12345", sunset())]).unwrap();

    let output = site.command().args(["cache", "show", "--json"]).assert().success();
    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert_eq!(json["12345"]["title"], "Sunset");
    assert_eq!(json["12345"]["raw_url"], "//live.staticflickr.com/65535/12345_z.jpg");
}

#[test]
fn test_cache_show_empty() {
    let site = TestSite::new();
    site.fixture.write_settings("").unwrap();

    site.command()
        .args(["cache", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 0 photos"));
}

#[test]
fn test_cache_path() {
    let site = TestSite::new();
    site.fixture.write_settings("").unwrap();

    site.command()
        .args(["cache", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("photos.cache"));
}
