//! Tree display via termtree.

use termtree::Tree;
use tracing::instrument;

use crate::domain::{NodeId, TreeArena, TreeError};

/// How node labels are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append `(size)` to every label
    pub show_sizes: bool,
    /// Suffix for sizes, e.g. "B"
    pub size_unit: String,
}

pub trait TreeRender {
    fn to_tree_string(&self, options: &RenderOptions) -> Tree<String>;
}

impl TreeRender for TreeArena {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, options: &RenderOptions) -> Tree<String> {
        match self.root() {
            Some(root) => render_subtree(self, root, options),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

/// Render the live subtree under `id`.
pub fn render_subtree(tree: &TreeArena, id: NodeId, options: &RenderOptions) -> Tree<String> {
    fn build(tree: &TreeArena, id: NodeId, options: &RenderOptions, out: &mut Tree<String>) {
        if let Ok(children) = tree.children(id) {
            for &child in children {
                let mut child_tree = Tree::new(label(tree, child, options));
                build(tree, child, options, &mut child_tree);
                out.push(child_tree);
            }
        }
    }

    let mut out = Tree::new(label(tree, id, options));
    build(tree, id, options, &mut out);
    out
}

fn label(tree: &TreeArena, id: NodeId, options: &RenderOptions) -> String {
    let name = tree.name(id).unwrap_or_default();
    match tree.size(id) {
        Ok(size) if options.show_sizes => format!("{} ({}{})", name, size, options.size_unit),
        Ok(_) => name.to_string(),
        Err(TreeError::SizeOverflow { .. }) if options.show_sizes => {
            format!("{} (overflow)", name)
        }
        Err(TreeError::SizeOverflow { .. }) => name.to_string(),
        Err(_) => format!("{} (deleted)", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_tree_when_rendering_with_sizes_then_labels_carry_sizes() {
        let (mut tree, root) = TreeArena::with_root("/");
        let dir = tree.insert_container(root, "/A/").unwrap();
        tree.insert_leaf(dir, "/A/1", 10).unwrap();

        let options = RenderOptions {
            show_sizes: true,
            size_unit: "B".into(),
        };
        let rendered = tree.to_tree_string(&options).to_string();

        assert!(rendered.starts_with("/ (10B)\n"));
        assert!(rendered.contains("/A/ (10B)"));
        assert!(rendered.contains("/A/1 (10B)"));
    }

    #[test]
    fn given_empty_tree_when_rendering_then_placeholder() {
        let tree = TreeArena::new();
        let rendered = tree.to_tree_string(&RenderOptions::default()).to_string();
        assert_eq!(rendered.trim(), "Empty tree");
    }

    #[test]
    fn given_deleted_subtree_when_rendering_root_then_omitted() {
        let (mut tree, root) = TreeArena::with_root("/");
        let dir = tree.insert_container(root, "/A/").unwrap();
        tree.insert_leaf(root, "/1", 1).unwrap();
        tree.delete(dir).unwrap();

        let rendered = tree.to_tree_string(&RenderOptions::default()).to_string();
        assert!(!rendered.contains("/A/"));
        assert!(rendered.contains("/1"));
    }

    #[test]
    fn given_overflowing_container_when_rendering_then_marked_overflow() {
        let (mut tree, root) = TreeArena::with_root("/");
        tree.insert_leaf(root, "/1", u64::MAX).unwrap();
        tree.insert_leaf(root, "/2", 1).unwrap();

        let options = RenderOptions {
            show_sizes: true,
            size_unit: String::new(),
        };
        let rendered = tree.to_tree_string(&options).to_string();

        assert!(rendered.starts_with("/ (overflow)\n"));
        assert!(!rendered.contains("deleted"));
    }
}
