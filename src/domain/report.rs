//! Human-readable size reports.

use std::fmt;

use crate::domain::arena::TreeArena;
use crate::domain::error::TreeResult;
use crate::domain::node::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeReport {
    pub name: String,
    pub size: u64,
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size of '{}' = {}", self.name, self.size)
    }
}

impl TreeArena {
    /// Name and aggregate size of a live node; `AlreadyDeleted` otherwise.
    pub fn size_report(&self, id: NodeId) -> TreeResult<SizeReport> {
        let size = self.size(id)?;
        Ok(SizeReport {
            name: self.name(id).unwrap_or_default().to_string(),
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TreeError;

    #[test]
    fn given_live_leaf_when_reporting_then_formats_name_and_size() {
        let (mut tree, root) = TreeArena::with_root("Dir:/");
        let file = tree.insert_leaf(root, "File:/1", 1).unwrap();

        let report = tree.size_report(file).unwrap();
        assert_eq!(report.to_string(), "Size of 'File:/1' = 1");
    }

    #[test]
    fn given_deleted_leaf_when_reporting_then_already_deleted() {
        let (mut tree, root) = TreeArena::with_root("Dir:/");
        let file = tree.insert_leaf(root, "File:/1", 1).unwrap();
        tree.delete(file).unwrap();

        assert_eq!(
            tree.size_report(file),
            Err(TreeError::AlreadyDeleted("File:/1".into()))
        );
    }
}
