//! Node types stored in the tree arena.

use std::fmt;

use generational_arena::Index;

/// Handle to a node in a [`TreeArena`](crate::domain::TreeArena).
///
/// Handles are generational: once the slot is reclaimed the handle never
/// resolves to whatever node reuses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (idx, generation) = self.0.into_raw_parts();
        write!(f, "#{}g{}", idx, generation)
    }
}

/// Variant-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Interior node, owns its children in insertion order
    Container { children: Vec<NodeId> },
    /// Terminal node with a fixed size
    Leaf { value: u64 },
}

/// Lifecycle flag. Only ever moves from `Live` to `Deleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Live,
    Deleted,
}

/// Tree node in the arena-based hierarchy.
#[derive(Debug)]
pub struct TreeNode {
    /// Name given at construction
    pub(crate) name: String,
    /// Back-reference to the owning container, None for the root.
    /// Never dereferenced without checking the slot is still live.
    pub(crate) parent: Option<NodeId>,
    pub(crate) state: Lifecycle,
    pub(crate) kind: NodeKind,
}

impl TreeNode {
    pub(crate) fn new(name: String, parent: Option<NodeId>, kind: NodeKind) -> Self {
        Self {
            name,
            parent,
            state: Lifecycle::Live,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_deleted(&self) -> bool {
        self.state == Lifecycle::Deleted
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container { .. })
    }

    /// Children of a container; empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Container { children } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
