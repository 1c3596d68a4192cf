//! Tests for building trees from layout files

use std::path::PathBuf;

use tempfile::TempDir;

use dirtree::application::{build_from_file, load_layout, sample_layout, ApplicationError};
use dirtree::domain::{TreeBuilder, TreeError};
use dirtree::util::testing;

fn create_layout_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write layout file");
    path
}

#[test]
fn given_layout_file_when_building_then_sizes_aggregate() {
    testing::init_test_setup();
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_layout_file(
        &temp,
        "tree.toml",
        r#"
name = "/"

[[children]]
name = "/A/"

[[children.children]]
name = "/A/1"
value = 10

[[children.children]]
name = "/A/2"
value = 100

[[children]]
name = "/1"
value = 1
"#,
    );

    // Act
    let (mut tree, root) = build_from_file(&path).unwrap();

    // Assert
    assert_eq!(tree.size(root), Ok(111));
    let dir_a = tree.children(root).unwrap()[0];
    assert_eq!(tree.name(dir_a), Some("/A/"));
    tree.delete(dir_a).unwrap();
    assert_eq!(tree.size(root), Ok(1));
}

#[test]
fn given_missing_file_when_building_then_io_error() {
    let temp = TempDir::new().unwrap();
    let result = build_from_file(&temp.path().join("absent.toml"));

    assert!(matches!(result, Err(ApplicationError::Io { .. })));
}

#[test]
fn given_leaf_with_children_when_building_then_invalid_layout() {
    let temp = TempDir::new().unwrap();
    let path = create_layout_file(
        &temp,
        "bad.toml",
        r#"
name = "/"

[[children]]
name = "/1"
value = 1

[[children.children]]
name = "/1/x"
value = 2
"#,
    );

    let result = build_from_file(&path);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(TreeError::InvalidLayout(_)))
    ));
}

#[test]
fn given_sample_layout_when_written_and_loaded_then_identical() {
    let temp = TempDir::new().unwrap();
    let text = toml::to_string(&sample_layout()).unwrap();
    let path = create_layout_file(&temp, "sample.toml", &text);

    let layout = load_layout(&path).unwrap();
    assert_eq!(layout, sample_layout());

    let (tree, root) = TreeBuilder::new().build(&layout).unwrap();
    assert_eq!(tree.size(root), Ok(1111111));
}
