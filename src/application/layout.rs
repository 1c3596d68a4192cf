//! Layout files: TOML descriptions of a tree.
//!
//! ```toml
//! name = "Dir:/"
//!
//! [[children]]
//! name = "Dir:/A/"
//!
//! [[children.children]]
//! name = "File:/A/1"
//! value = 10
//! ```

use std::path::Path;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{LayoutNode, NodeId, TreeArena, TreeBuilder};

/// Parse layout TOML.
pub fn parse_layout(content: &str) -> ApplicationResult<LayoutNode> {
    toml::from_str(content).map_err(|e| ApplicationError::Config {
        message: format!("parse layout: {e}"),
    })
}

/// Read and parse a layout file.
#[instrument(level = "debug")]
pub fn load_layout(path: &Path) -> ApplicationResult<LayoutNode> {
    let content = std::fs::read_to_string(path).with_path_context("read layout", path)?;
    let layout = parse_layout(&content)?;
    debug!(root = %layout.name, "layout loaded");
    Ok(layout)
}

/// Load a layout file and build the tree it describes.
pub fn build_from_file(path: &Path) -> ApplicationResult<(TreeArena, NodeId)> {
    let layout = load_layout(path)?;
    Ok(TreeBuilder::new().build(&layout)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_toml_when_parsing_then_returns_layout() {
        let layout = parse_layout(
            r#"
name = "/"

[[children]]
name = "/A/"

[[children.children]]
name = "/A/1"
value = 10

[[children]]
name = "/1"
value = 1
"#,
        )
        .unwrap();

        assert_eq!(layout.name, "/");
        assert_eq!(layout.children.len(), 2);
        assert_eq!(layout.children[0].children[0].value, Some(10));
        assert_eq!(layout.children[1].value, Some(1));
    }

    #[test]
    fn given_missing_name_when_parsing_then_config_error() {
        let result = parse_layout("value = 3\n");
        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }
}
