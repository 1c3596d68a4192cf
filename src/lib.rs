//! Composite directory/file tree.
//!
//! Containers own their children in a generational arena; children point back
//! at their container through a non-owning index. Sizes aggregate bottom-up and
//! deletion cascades depth-first before a node detaches from its parent.
//!
//! ```
//! use dirtree::domain::{DeleteOutcome, TreeArena, TreeError};
//!
//! let (mut tree, root) = TreeArena::with_root("/");
//! let dir = tree.insert_container(root, "/A/").unwrap();
//! let file = tree.insert_leaf(dir, "/A/1", 10).unwrap();
//! tree.insert_leaf(root, "/1", 1).unwrap();
//! assert_eq!(tree.size(root), Ok(11));
//!
//! assert_eq!(tree.delete(dir), Ok(DeleteOutcome::Deleted));
//! assert_eq!(tree.size(root), Ok(1));
//! assert!(matches!(tree.size(file), Err(TreeError::AlreadyDeleted(_))));
//! assert_eq!(tree.delete(dir), Ok(DeleteOutcome::AlreadyDeleted));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod render;
pub mod util;
