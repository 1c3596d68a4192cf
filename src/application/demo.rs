//! Scripted walkthrough over a sample directory tree.

use tracing::instrument;

use crate::domain::{DeleteOutcome, LayoutNode, NodeId, SizeReport, TreeArena, TreeError, TreeResult};

/// Sample tree with handles to every node the demo script touches.
#[derive(Debug)]
pub struct SampleTree {
    pub tree: TreeArena,
    pub root: NodeId,
    pub dir_a: NodeId,
    pub dir_b: NodeId,
    pub dir_c: NodeId,
    pub file_a2: NodeId,
    pub file_c1: NodeId,
    pub file_c3: NodeId,
}

/// Build the sample tree:
///
/// ```text
/// Dir:/
/// ├── Dir:/A/
/// │   ├── Dir:/A/A/
/// │   │   └── Dir:/A/B/
/// │   │       └── File:/A/B/1 (1000)
/// │   ├── File:/A/1 (10)
/// │   └── File:/A/2 (100)
/// ├── Dir:/B/
/// ├── Dir:/C/
/// │   ├── File:/C/1 (10000)
/// │   ├── File:/C/2 (100000)
/// │   └── File:/C/3 (1000000)
/// └── File:/1 (1)
/// ```
pub fn sample_tree() -> TreeResult<SampleTree> {
    let (mut tree, root) = TreeArena::with_root("Dir:/");
    let dir_a = tree.insert_container(root, "Dir:/A/")?;
    let dir_aa = tree.insert_container(dir_a, "Dir:/A/A/")?;
    let dir_ab = tree.insert_container(dir_aa, "Dir:/A/B/")?;
    let dir_b = tree.insert_container(root, "Dir:/B/")?;
    let dir_c = tree.insert_container(root, "Dir:/C/")?;

    tree.insert_leaf(root, "File:/1", 1)?;
    tree.insert_leaf(dir_a, "File:/A/1", 10)?;
    let file_a2 = tree.insert_leaf(dir_a, "File:/A/2", 100)?;
    tree.insert_leaf(dir_ab, "File:/A/B/1", 1000)?;
    let file_c1 = tree.insert_leaf(dir_c, "File:/C/1", 10000)?;
    tree.insert_leaf(dir_c, "File:/C/2", 100000)?;
    let file_c3 = tree.insert_leaf(dir_c, "File:/C/3", 1000000)?;

    Ok(SampleTree {
        tree,
        root,
        dir_a,
        dir_b,
        dir_c,
        file_a2,
        file_c1,
        file_c3,
    })
}

/// Same shape as [`sample_tree`], as a layout.
pub fn sample_layout() -> LayoutNode {
    LayoutNode::container(
        "Dir:/",
        vec![
            LayoutNode::container(
                "Dir:/A/",
                vec![
                    LayoutNode::container(
                        "Dir:/A/A/",
                        vec![LayoutNode::container(
                            "Dir:/A/B/",
                            vec![LayoutNode::leaf("File:/A/B/1", 1000)],
                        )],
                    ),
                    LayoutNode::leaf("File:/A/1", 10),
                    LayoutNode::leaf("File:/A/2", 100),
                ],
            ),
            LayoutNode::container("Dir:/B/", vec![]),
            LayoutNode::container(
                "Dir:/C/",
                vec![
                    LayoutNode::leaf("File:/C/1", 10000),
                    LayoutNode::leaf("File:/C/2", 100000),
                    LayoutNode::leaf("File:/C/3", 1000000),
                ],
            ),
            LayoutNode::leaf("File:/1", 1),
        ],
    )
}

/// One line of demo output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoEvent {
    Size(SizeReport),
    Deleted(String),
    Removed { child: String, container: String },
    RemoveFailed { child: String, container: String },
    AlreadyDeleted(String),
    /// A recoverable error surfaced by a step; the script carries on
    Error(TreeError),
    Separator,
}

/// Run the scripted sequence of size reports and removals.
///
/// Recoverable errors are recorded as events; only invariant violations abort.
#[instrument(level = "info", skip(sample))]
pub fn run_demo(sample: &mut SampleTree) -> TreeResult<Vec<DemoEvent>> {
    let mut events = Vec::new();
    let SampleTree {
        tree,
        root,
        dir_a,
        dir_b,
        dir_c,
        file_a2,
        file_c1,
        file_c3,
    } = sample;
    let (root, dir_a, dir_b, dir_c) = (*root, *dir_a, *dir_b, *dir_c);
    let (file_a2, file_c1, file_c3) = (*file_a2, *file_c1, *file_c3);

    size(tree, root, &mut events)?;
    events.push(DemoEvent::Separator);
    size(tree, dir_a, &mut events)?;
    size(tree, file_a2, &mut events)?;
    remove(tree, dir_a, file_a2, &mut events)?;
    size(tree, dir_a, &mut events)?;
    events.push(DemoEvent::Separator);
    remove(tree, root, dir_a, &mut events)?;
    size(tree, root, &mut events)?;
    events.push(DemoEvent::Separator);
    size(tree, dir_b, &mut events)?;
    size(tree, dir_c, &mut events)?;
    remove(tree, dir_c, file_c3, &mut events)?;
    size(tree, dir_c, &mut events)?;
    events.push(DemoEvent::Separator);
    // File:/C/1 lives in Dir:/C/, not directly under the root
    remove(tree, root, file_c1, &mut events)?;
    remove(tree, root, dir_c, &mut events)?;
    size(tree, root, &mut events)?;
    events.push(DemoEvent::Separator);
    size(tree, file_a2, &mut events)?;
    delete(tree, dir_a, &mut events)?;
    size(tree, root, &mut events)?;

    Ok(events)
}

fn size(tree: &TreeArena, id: NodeId, events: &mut Vec<DemoEvent>) -> TreeResult<()> {
    events.push(match tree.size_report(id) {
        Ok(report) => DemoEvent::Size(report),
        Err(e) if e.is_recoverable() => DemoEvent::Error(e),
        Err(e) => return Err(e),
    });
    Ok(())
}

fn remove(
    tree: &mut TreeArena,
    container: NodeId,
    child: NodeId,
    events: &mut Vec<DemoEvent>,
) -> TreeResult<()> {
    let child_name = tree.name(child).unwrap_or_default().to_string();
    let container_name = tree.name(container).unwrap_or_default().to_string();
    events.push(match tree.remove(container, child) {
        Ok(true) => DemoEvent::Removed {
            child: child_name,
            container: container_name,
        },
        Ok(false) => DemoEvent::RemoveFailed {
            child: child_name,
            container: container_name,
        },
        Err(e) if e.is_recoverable() => DemoEvent::Error(e),
        Err(e) => return Err(e),
    });
    Ok(())
}

fn delete(tree: &mut TreeArena, id: NodeId, events: &mut Vec<DemoEvent>) -> TreeResult<()> {
    let name = tree.name(id).unwrap_or_default().to_string();
    events.push(match tree.delete(id)? {
        DeleteOutcome::Deleted => DemoEvent::Deleted(name),
        DeleteOutcome::AlreadyDeleted => DemoEvent::AlreadyDeleted(name),
    });
    Ok(())
}
