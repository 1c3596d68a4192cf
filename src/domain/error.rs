//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree's lifecycle and shape rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Query or mutation targeting a node whose lifecycle flag is set.
    #[error("'{0}' is already deleted")]
    AlreadyDeleted(String),

    /// Construction that would break the tree shape.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// Detach found no matching child in the parent's collection.
    #[error("'{child}' not found in '{container}'")]
    NotFound { container: String, child: String },

    /// A child that should have left its container during a cascade is still there.
    #[error("inconsistent tree: {0}")]
    Inconsistent(String),

    /// Aggregate size does not fit in a `u64`.
    #[error("size of '{container}' overflows")]
    SizeOverflow { container: String },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

impl TreeError {
    /// `NotFound` means the parent/child bookkeeping is broken; nothing the
    /// caller does afterwards can be trusted.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            TreeError::NotFound { .. } | TreeError::Inconsistent(_)
        )
    }
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_not_found_when_checking_recoverable_then_false() {
        let err = TreeError::NotFound {
            container: "/".into(),
            child: "/A/".into(),
        };
        assert!(!err.is_recoverable());
        assert!(TreeError::AlreadyDeleted("/A/".into()).is_recoverable());
        assert!(TreeError::InvalidTopology("x".into()).is_recoverable());
        assert!(TreeError::SizeOverflow {
            container: "/".into()
        }
        .is_recoverable());
    }

    #[test]
    fn given_already_deleted_when_displayed_then_names_node() {
        let err = TreeError::AlreadyDeleted("File:/A/2".into());
        assert_eq!(err.to_string(), "'File:/A/2' is already deleted");
    }
}
