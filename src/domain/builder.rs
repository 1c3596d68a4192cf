//! Tree builder for turning a nested layout description into a tree arena.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::arena::TreeArena;
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::NodeId;

/// Nested description of a tree. A node with a `value` is a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    pub fn container(name: impl Into<String>, children: Vec<LayoutNode>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children,
        }
    }

    pub fn leaf(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            children: Vec::new(),
        }
    }
}

/// Constructs trees from layouts through the regular constructors.
#[derive(Debug, Default)]
pub struct TreeBuilder;

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a tree whose root is `layout`.
    #[instrument(level = "debug", skip(self, layout), fields(root = %layout.name))]
    pub fn build(&self, layout: &LayoutNode) -> TreeResult<(TreeArena, NodeId)> {
        if layout.value.is_some() {
            return Err(TreeError::InvalidLayout(format!(
                "root '{}' must be a container",
                layout.name
            )));
        }

        let (mut tree, root) = TreeArena::with_root(layout.name.clone());
        let mut stack: Vec<(&LayoutNode, NodeId)> = layout
            .children
            .iter()
            .rev()
            .map(|child| (child, root))
            .collect();

        while let Some((current, parent)) = stack.pop() {
            if current.value.is_some() && !current.children.is_empty() {
                return Err(TreeError::InvalidLayout(format!(
                    "leaf '{}' cannot have children",
                    current.name
                )));
            }
            let id = tree.insert_node(Some(parent), current.name.clone(), current.value)?;
            // Reverse so siblings are inserted in declaration order
            for child in current.children.iter().rev() {
                stack.push((child, id));
            }
        }

        Ok((tree, root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_layout_when_building_then_preserves_order_and_sizes() {
        let layout = LayoutNode::container(
            "/",
            vec![
                LayoutNode::container(
                    "/A/",
                    vec![LayoutNode::leaf("/A/1", 10), LayoutNode::leaf("/A/2", 100)],
                ),
                LayoutNode::leaf("/1", 1),
            ],
        );

        let (tree, root) = TreeBuilder::new().build(&layout).unwrap();

        assert_eq!(tree.size(root).unwrap(), 111);
        let names: Vec<_> = tree.iter().map(|(_, n)| n.name().to_string()).collect();
        assert_eq!(names, vec!["/", "/A/", "/A/1", "/A/2", "/1"]);
    }

    #[test]
    fn given_leaf_root_when_building_then_invalid_layout() {
        let result = TreeBuilder::new().build(&LayoutNode::leaf("/", 1));
        assert!(matches!(result, Err(TreeError::InvalidLayout(_))));
    }

    #[test]
    fn given_leaf_with_children_when_building_then_invalid_layout() {
        let mut leaf = LayoutNode::leaf("/1", 1);
        leaf.children.push(LayoutNode::leaf("/1/x", 2));
        let layout = LayoutNode::container("/", vec![leaf]);

        let result = TreeBuilder::new().build(&layout);
        assert!(matches!(result, Err(TreeError::InvalidLayout(_))));
    }
}
