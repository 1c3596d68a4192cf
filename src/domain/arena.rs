use generational_arena::Arena;
use tracing::{debug, info, instrument, warn};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::{Lifecycle, NodeId, NodeKind, TreeNode};

/// Outcome of [`TreeArena::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The node was deleted earlier; nothing changed.
    AlreadyDeleted,
}

/// Arena-based composite tree.
///
/// Containers own their children through the arena; every child keeps a
/// generational index to its container as a non-owning back-reference.
/// Deleted nodes stay in their slot as tombstones until [`TreeArena::purge`]
/// so that queries through their handles keep failing with `AlreadyDeleted`.
#[derive(Debug)]
pub struct TreeArena {
    /// Arena storage for all tree nodes, tombstones included
    arena: Arena<TreeNode>,
    /// Index of the root container, None for empty trees
    root: Option<NodeId>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Create a tree holding only a root container.
    pub fn with_root(name: impl Into<String>) -> (Self, NodeId) {
        let mut tree = Self::new();
        let root = tree.alloc(name.into(), NodeKind::Container { children: Vec::new() });
        tree.root = Some(root);
        (tree, root)
    }

    /// Add the root container. A tree has at most one live root.
    #[instrument(level = "debug", skip(self, name))]
    pub fn insert_root(&mut self, name: impl Into<String>) -> TreeResult<NodeId> {
        let name = name.into();
        if let Some(root) = self.root() {
            return Err(TreeError::InvalidTopology(format!(
                "cannot add root '{}': tree already has root '{}'",
                name,
                self.label(root)
            )));
        }
        let root = self.alloc(name, NodeKind::Container { children: Vec::new() });
        self.root = Some(root);
        Ok(root)
    }

    pub fn insert_container(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
    ) -> TreeResult<NodeId> {
        self.insert_node(Some(parent), name.into(), None)
    }

    pub fn insert_leaf(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        value: u64,
    ) -> TreeResult<NodeId> {
        self.insert_node(Some(parent), name.into(), Some(value))
    }

    /// Construct a node and register it with its parent in one step.
    ///
    /// `value` selects the variant: `Some` builds a leaf, `None` a container.
    /// A missing parent is only valid for a container, which then becomes the
    /// root. Fails with `InvalidTopology` without creating anything if the
    /// parent is gone, deleted, or a leaf.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_node(
        &mut self,
        parent: Option<NodeId>,
        name: String,
        value: Option<u64>,
    ) -> TreeResult<NodeId> {
        let Some(parent) = parent else {
            return match value {
                None => self.insert_root(name),
                Some(_) => Err(TreeError::InvalidTopology(format!(
                    "leaf '{}' must have a parent container",
                    name
                ))),
            };
        };

        match self.arena.get(parent.0) {
            None => {
                return Err(TreeError::InvalidTopology(format!(
                    "parent {} of '{}' no longer exists",
                    parent, name
                )))
            }
            Some(p) if p.is_deleted() => {
                return Err(TreeError::InvalidTopology(format!(
                    "parent '{}' of '{}' is deleted",
                    p.name, name
                )))
            }
            Some(p) if !p.is_container() => {
                return Err(TreeError::InvalidTopology(format!(
                    "'{}' is a leaf and cannot hold '{}'",
                    p.name, name
                )))
            }
            Some(_) => {}
        }

        let kind = match value {
            Some(value) => NodeKind::Leaf { value },
            None => NodeKind::Container { children: Vec::new() },
        };
        let id = self.alloc(name, kind);
        if let Err(e) = self.add_child(parent, id) {
            self.arena.remove(id.0);
            return Err(e);
        }
        Ok(id)
    }

    fn alloc(&mut self, name: String, kind: NodeKind) -> NodeId {
        NodeId(self.arena.insert(TreeNode::new(name, None, kind)))
    }

    /// Append `child` to the end of `container` and point the child back at it.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn add_child(&mut self, container: NodeId, child: NodeId) -> TreeResult<()> {
        let name = self.label(container);
        match &mut self.live_mut(container)?.kind {
            NodeKind::Container { children } => children.push(child),
            NodeKind::Leaf { .. } => {
                return Err(TreeError::InvalidTopology(format!(
                    "'{}' is a leaf and cannot hold children",
                    name
                )))
            }
        }
        let node = self.live_mut(child)?;
        node.parent = Some(container);
        debug!(container = %name, child = %node.name, "attached");
        Ok(())
    }

    /// Remove the first child matching `child` by identity.
    ///
    /// Only the detach step of `delete` calls this, possibly while the
    /// container is itself in the middle of a cascade.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn remove_child(&mut self, container: NodeId, child: NodeId) -> TreeResult<bool> {
        let name = self.label(container);
        match &mut self.live_mut(container)?.kind {
            NodeKind::Container { children } => {
                match children.iter().position(|&c| c == child) {
                    Some(pos) => {
                        children.remove(pos);
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
            NodeKind::Leaf { .. } => Err(TreeError::InvalidTopology(format!(
                "'{}' is a leaf and has no children",
                name
            ))),
        }
    }

    /// Aggregate size of a live node: a leaf's value, or the sum over a
    /// container's children (0 when empty).
    ///
    /// Fails with `SizeOverflow` when the sum exceeds `u64::MAX`. Recurses once
    /// per level, so nesting depth is bounded by the thread's stack.
    #[instrument(level = "trace", skip(self))]
    pub fn size(&self, id: NodeId) -> TreeResult<u64> {
        let node = self.live(id)?;
        match &node.kind {
            NodeKind::Leaf { value } => Ok(*value),
            NodeKind::Container { children } => children.iter().try_fold(0u64, |acc, &c| {
                acc.checked_add(self.size(c)?)
                    .ok_or_else(|| TreeError::SizeOverflow {
                        container: node.name.clone(),
                    })
            }),
        }
    }

    /// Delete a node and everything below it.
    ///
    /// Order: tear down children, mark deleted, detach from the parent.
    /// Deleting an already-deleted node is a no-op reported as
    /// [`DeleteOutcome::AlreadyDeleted`].
    ///
    /// The two non-recoverable errors leave the cascade half done and are
    /// not rolled back: on `Inconsistent` the children deleted so far stay
    /// deleted while `id` stays live; on `NotFound` `id` and its subtree are
    /// already marked deleted but the parent was left untouched.
    ///
    /// Recurses once per level, like [`TreeArena::size`].
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, id: NodeId) -> TreeResult<DeleteOutcome> {
        let name = match self.arena.get(id.0) {
            Some(node) if !node.is_deleted() => node.name.clone(),
            _ => {
                warn!(node = %self.label(id), "already deleted");
                return Ok(DeleteOutcome::AlreadyDeleted);
            }
        };

        self.tear_down(id)?;

        let node = self.live_mut(id)?;
        node.state = Lifecycle::Deleted;
        let parent = node.parent;

        if let Some(parent) = parent.filter(|&p| self.is_live(p)) {
            if !self.remove_child(parent, id)? {
                return Err(TreeError::NotFound {
                    container: self.label(parent),
                    child: name,
                });
            }
        }

        info!(%name, "deleted");
        Ok(DeleteOutcome::Deleted)
    }

    /// Delete the current first child until the container is empty. Each
    /// child detaches itself, so the collection is re-read every round.
    fn tear_down(&mut self, id: NodeId) -> TreeResult<()> {
        loop {
            let first = match &self.live(id)?.kind {
                NodeKind::Leaf { .. } => return Ok(()),
                NodeKind::Container { children } => match children.first() {
                    Some(&first) => first,
                    None => return Ok(()),
                },
            };
            self.delete(first)?;
            if self.live(id)?.children().first() == Some(&first) {
                return Err(TreeError::Inconsistent(format!(
                    "'{}' did not leave '{}' when deleted",
                    self.label(first),
                    self.label(id)
                )));
            }
        }
    }

    /// Delete `child` only if it is currently held by `container`.
    ///
    /// Returns `false`, changing nothing, when `child` lives elsewhere or is
    /// gone.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, container: NodeId, child: NodeId) -> TreeResult<bool> {
        let node = self.live(container)?;
        if !node.is_container() {
            return Err(TreeError::InvalidTopology(format!(
                "'{}' is a leaf and has no children",
                node.name
            )));
        }
        if !node.children().contains(&child) {
            debug!(container = %node.name, child = %self.label(child), "not a child");
            return Ok(false);
        }
        self.delete(child)?;
        Ok(true)
    }

    /// Reclaim the slots of all deleted nodes. Returns how many were freed.
    #[instrument(level = "debug", skip(self))]
    pub fn purge(&mut self) -> usize {
        let dead: Vec<_> = self
            .arena
            .iter()
            .filter(|(_, node)| node.is_deleted())
            .map(|(idx, _)| idx)
            .collect();
        for &idx in &dead {
            self.arena.remove(idx);
        }
        if self.root.is_some_and(|r| self.arena.get(r.0).is_none()) {
            self.root = None;
        }
        debug!(reclaimed = dead.len(), "purged tombstones");
        dead.len()
    }

    fn live(&self, id: NodeId) -> TreeResult<&TreeNode> {
        match self.arena.get(id.0) {
            Some(node) if !node.is_deleted() => Ok(node),
            _ => Err(TreeError::AlreadyDeleted(self.label(id))),
        }
    }

    fn live_mut(&mut self, id: NodeId) -> TreeResult<&mut TreeNode> {
        let label = self.label(id);
        match self.arena.get_mut(id.0) {
            Some(node) if !node.is_deleted() => Ok(node),
            _ => Err(TreeError::AlreadyDeleted(label)),
        }
    }

    /// Name for diagnostics; falls back to the handle once the slot is reclaimed.
    fn label(&self, id: NodeId) -> String {
        self.arena
            .get(id.0)
            .map(|node| node.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Node behind a handle, tombstones included.
    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena.get(id.0)
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id.0).map(TreeNode::name)
    }

    /// Live root container, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root.filter(|&r| self.is_live(r))
    }

    /// Parent of a node, resolved defensively: a deleted or reclaimed parent
    /// is reported as absent.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena
            .get(id.0)
            .and_then(|node| node.parent)
            .filter(|&p| self.is_live(p))
    }

    pub fn children(&self, id: NodeId) -> TreeResult<&[NodeId]> {
        Ok(self.live(id)?.children())
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        self.arena.get(id.0).is_some_and(|node| !node.is_deleted())
    }

    /// True for tombstones and for reclaimed handles.
    pub fn is_deleted(&self, id: NodeId) -> bool {
        !self.is_live(id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.arena.iter().filter(|(_, node)| !node.is_deleted()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of occupied slots, tombstones included.
    pub fn capacity_used(&self) -> usize {
        self.arena.len()
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root())
    }

    /// Pre-order walk of the live subtree under `id`.
    pub fn subtree(&self, id: NodeId) -> TreeIterator<'_> {
        TreeIterator::new(self, Some(id).filter(|&i| self.is_live(i)))
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, self.root())
    }

    /// Number of levels below and including the root; recursive like `size`.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root() {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, id: NodeId) -> usize {
        match self.live(id) {
            Ok(node) => {
                1 + node
                    .children()
                    .iter()
                    .map(|&child| self.calculate_depth(child))
                    .max()
                    .unwrap_or(0)
            }
            Err(_) => 0,
        }
    }

    /// Names of all live leaves, left to right.
    pub fn leaf_names(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| !node.is_container())
            .map(|(_, node)| node.name.clone())
            .collect()
    }
}

pub struct TreeIterator<'a> {
    tree: &'a TreeArena,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a TreeArena, start: Option<NodeId>) -> Self {
        Self {
            tree,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Ok(node) = self.tree.live(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children().iter().rev());
                return Some((current, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a TreeArena,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a TreeArena, start: Option<NodeId>) -> Self {
        Self {
            tree,
            stack: start.map(|s| (s, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Ok(node) = self.tree.live(current) {
                if visited {
                    return Some((current, node));
                }
                self.stack.push((current, true));
                for &child in node.children().iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
