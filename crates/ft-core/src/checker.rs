//! Structural invariant checker.
//!
//! [`Checker::check`] walks a [`FileTree`] from its root and re-derives, from
//! paths and raw arena lookups alone, that the tree is well formed. It never
//! modifies the tree; the first broken invariant is reported as a
//! [`Violation`] naming the node where it was found.
//!
//! # Examples
//!
//! ```
//! use ft_core::{Checker, FileTree};
//!
//! let mut tree = FileTree::new();
//! assert!(Checker::is_valid(&tree));
//!
//! tree.init()?;
//! tree.insert_dir("a/b/c")?;
//! assert_eq!(Checker::check(&tree), Ok(()));
//! # Ok::<(), ft_core::FtError>(())
//! ```

use crate::node::{Node, NodeArena, NodeId};
use crate::path::FtPath;
use crate::tree::FileTree;
use std::cmp::Ordering;
use std::collections::HashSet;
use thiserror::Error;

/// A broken tree invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// An uninitialized tree still has a root or a non-zero count
    #[error("tree is not initialized but has_root={has_root} and count={count}")]
    UninitializedWithState {
        /// Whether a root is set
        has_root: bool,
        /// The recorded node count
        count: usize,
    },

    /// A node id is referenced but not present in the arena
    #[error("node {id} is referenced but does not exist")]
    DanglingNode {
        /// The unresolvable id
        id: NodeId,
    },

    /// A node is reachable along more than one route
    #[error("node {path} is reachable more than once")]
    RevisitedNode {
        /// Path of the node reached again
        path: String,
    },

    /// The root records a parent
    #[error("root {path} has a parent")]
    RootHasParent {
        /// Path of the root
        path: String,
    },

    /// A node without a parent is not at depth 1
    #[error("parentless node {path} is not at depth 1")]
    RootDepth {
        /// Path of the node
        path: String,
    },

    /// A node's parent link disagrees with the parent that lists it
    #[error("node {path} is listed under {listed_under} but records parent {recorded:?}")]
    ParentLinkMismatch {
        /// Path of the node
        path: String,
        /// Path of the directory listing the node
        listed_under: String,
        /// Parent id the node itself records
        recorded: Option<NodeId>,
    },

    /// The parent's path is not a prefix of the node's path
    #[error("parent {parent} is not an ancestor of {path}")]
    ParentNotAncestor {
        /// Path of the parent
        parent: String,
        /// Path of the node
        path: String,
    },

    /// The node is not exactly one level below its parent
    #[error("{path} is not exactly one level below {parent}")]
    SkippedLevel {
        /// Path of the parent
        parent: String,
        /// Path of the node
        path: String,
    },

    /// A directory lists the same path twice
    #[error("{parent} lists {path} more than once")]
    DuplicateSibling {
        /// Path of the directory
        parent: String,
        /// The repeated path
        path: String,
    },

    /// A directory lists its children out of order
    #[error("{parent} lists {first} before {second}")]
    SiblingOrder {
        /// Path of the directory
        parent: String,
        /// The earlier, greater path
        first: String,
        /// The later, smaller path
        second: String,
    },

    /// The recorded count differs from the number of reachable nodes
    #[error("count is {recorded} but {reachable} nodes are reachable")]
    CountMismatch {
        /// Count recorded by the tree
        recorded: usize,
        /// Nodes reachable from the root
        reachable: usize,
    },

    /// The arena holds nodes that are not reachable from the root
    #[error("{live} nodes are live but only {reachable} are reachable")]
    OrphanedNodes {
        /// Nodes held by the arena
        live: usize,
        /// Nodes reachable from the root
        reachable: usize,
    },
}

/// Invariant checker over a [`FileTree`].
#[derive(Debug)]
pub struct Checker<'a> {
    nodes: &'a NodeArena,
    visited: HashSet<NodeId>,
}

impl<'a> Checker<'a> {
    /// Checks every invariant of `tree`.
    ///
    /// # Errors
    ///
    /// Returns the first [`Violation`] found.
    pub fn check(tree: &'a FileTree) -> Result<(), Violation> {
        if !tree.is_initialized() && (tree.root().is_some() || tree.count() != 0) {
            return Err(Violation::UninitializedWithState {
                has_root: tree.root().is_some(),
                count: tree.count(),
            });
        }

        let mut checker = Self {
            nodes: tree.nodes(),
            visited: HashSet::new(),
        };
        let reachable = match tree.root() {
            Some(root) => checker.check_from(root)?,
            None => 0,
        };

        if reachable != tree.count() {
            return Err(Violation::CountMismatch {
                recorded: tree.count(),
                reachable,
            });
        }
        if tree.nodes().len() != reachable {
            return Err(Violation::OrphanedNodes {
                live: tree.nodes().len(),
                reachable,
            });
        }
        Ok(())
    }

    /// Returns `true` if `tree` satisfies every invariant.
    #[must_use]
    pub fn is_valid(tree: &'a FileTree) -> bool {
        Self::check(tree).is_ok()
    }

    /// Checks the subtree at `root` and returns its node count.
    ///
    /// Walks in pre-order with an explicit stack, so depth is bounded by
    /// memory rather than by the call stack.
    fn check_from(&mut self, root: NodeId) -> Result<usize, Violation> {
        let nodes = self.nodes;
        let mut pending: Vec<(NodeId, Option<&'a Node>)> = vec![(root, None)];
        let mut total = 0;

        while let Some((id, listed_under)) = pending.pop() {
            let node = nodes.get(id).ok_or(Violation::DanglingNode { id })?;
            if !self.visited.insert(id) {
                return Err(Violation::RevisitedNode {
                    path: node.path().to_string(),
                });
            }

            match listed_under {
                Some(parent) => Self::check_parent(node, parent, nodes)?,
                None => {
                    if node.parent().is_some() {
                        return Err(Violation::RootHasParent {
                            path: node.path().to_string(),
                        });
                    }
                    if node.path().depth() != 1 {
                        return Err(Violation::RootDepth {
                            path: node.path().to_string(),
                        });
                    }
                }
            }
            total += 1;

            Self::check_siblings(node, nodes)?;
            pending.extend(node.children().iter().rev().map(|child| (*child, Some(node))));
        }
        Ok(total)
    }

    fn check_siblings(node: &Node, nodes: &NodeArena) -> Result<(), Violation> {
        let mut previous: Option<&FtPath> = None;
        for child_id in node.children() {
            let child = nodes
                .get(*child_id)
                .ok_or(Violation::DanglingNode { id: *child_id })?;

            if let Some(previous) = previous {
                match previous.cmp(child.path()) {
                    Ordering::Less => {}
                    Ordering::Equal => {
                        return Err(Violation::DuplicateSibling {
                            parent: node.path().to_string(),
                            path: child.path().to_string(),
                        });
                    }
                    Ordering::Greater => {
                        return Err(Violation::SiblingOrder {
                            parent: node.path().to_string(),
                            first: previous.to_string(),
                            second: child.path().to_string(),
                        });
                    }
                }
            }
            previous = Some(child.path());
        }
        Ok(())
    }

    fn check_parent(node: &Node, parent: &Node, nodes: &NodeArena) -> Result<(), Violation> {
        let path = node.path();
        let parent_path = parent.path();

        let recorded = node.parent();
        if recorded.and_then(|id| nodes.get(id)).map(Node::path) != Some(parent_path) {
            return Err(Violation::ParentLinkMismatch {
                path: path.to_string(),
                listed_under: parent_path.to_string(),
                recorded,
            });
        }
        if !path.starts_with(parent_path) {
            return Err(Violation::ParentNotAncestor {
                parent: parent_path.to_string(),
                path: path.to_string(),
            });
        }
        if path.depth() != parent_path.depth() + 1 {
            return Err(Violation::SkippedLevel {
                parent: parent_path.to_string(),
                path: path.to_string(),
            });
        }
        Ok(())
    }
}
