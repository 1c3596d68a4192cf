//! Domain layer: the composite tree and its lifecycle rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod node;
pub mod report;

pub use arena::{DeleteOutcome, PostOrderIterator, TreeArena, TreeIterator};
pub use builder::{LayoutNode, TreeBuilder};
pub use error::{TreeError, TreeResult};
pub use node::{Lifecycle, NodeId, NodeKind, TreeNode};
pub use report::SizeReport;
