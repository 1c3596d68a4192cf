//! Integration tests for Settings layered loading.
//!
//! These tests pass an explicit config file, so no global config is read.

use std::fs;

use tempfile::TempDir;

use dirtree::application::ApplicationError;
use dirtree::config::Settings;

#[test]
fn given_missing_config_file_when_loading_then_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let settings = Settings::load_from(Some(temp.path().join("none.toml").as_path())).unwrap();

    assert_eq!(settings.show_sizes, Settings::default().show_sizes);
}

#[test]
fn given_config_file_when_loading_then_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("dirtree.toml");
    fs::write(&path, "show_sizes = false\nsize_unit = \"B\"\n").unwrap();

    let settings = Settings::load_from(Some(path.as_path())).unwrap();

    assert!(!settings.show_sizes);
    assert_eq!(settings.size_unit, "B");
    assert!(settings.layout.is_none());
    assert!(!settings.render_options().show_sizes);
}

#[test]
fn given_malformed_config_file_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("dirtree.toml");
    fs::write(&path, "show_sizes = \"maybe\"\n").unwrap();

    let result = Settings::load_from(Some(path.as_path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_tilde_layout_in_config_file_when_loading_then_resolved_under_home() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("dirtree.toml");
    fs::write(&path, "layout = \"~/layouts/home.toml\"\n").unwrap();

    let settings = Settings::load_from(Some(path.as_path())).unwrap();

    let home = std::env::var("HOME").expect("HOME should be set");
    let layout = settings.layout.expect("layout should be set");
    assert!(layout.starts_with(&home), "{}", layout.display());
    assert!(layout.ends_with("layouts/home.toml"));
}
