//! Tree nodes and the arena that owns them.
//!
//! Nodes are stored in a [`NodeArena`] and refer to each other by
//! [`NodeId`]. A directory lists its children in one collection ordered by
//! path; files carry their [`FileContents`] and have no children at all.
//! The parent link is a plain id and never owns anything: the arena is the
//! only owner, and [`NodeArena::free`] releases a whole subtree at once.
//!
//! # Examples
//!
//! ```
//! use ft_core::{FtPath, Kind, NewNode, NodeArena};
//!
//! let mut nodes = NodeArena::new();
//! let root = nodes.create(FtPath::new("r")?, None, NewNode::Directory)?;
//! let file = nodes.create(FtPath::new("r/f")?, Some(root), NewNode::File("x".into()))?;
//!
//! assert_eq!(nodes.num_children(root, Some(Kind::File)), 1);
//! assert_eq!(nodes.has_child(root, &FtPath::new("r/f")?, Kind::File), (true, 0));
//! assert_eq!(nodes.parent(file), Some(root));
//!
//! assert_eq!(nodes.free(root), 2);
//! assert!(nodes.is_empty());
//! # Ok::<(), ft_core::FtError>(())
//! ```

use crate::contents::FileContents;
use crate::error::{FtError, Result};
use crate::path::FtPath;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Stable identifier of a node inside a [`NodeArena`].
///
/// Ids are never reused, so an id that outlives its node can only fail to
/// resolve; it cannot silently point at a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a node is a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// A directory
    Directory,
    /// A file
    File,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => f.write_str("directory"),
            Self::File => f.write_str("file"),
        }
    }
}

/// What a new node should be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewNode {
    /// An empty directory
    Directory,
    /// A file with the given contents
    File(FileContents),
}

impl NewNode {
    /// Returns the kind of node this describes.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Directory => Kind::Directory,
            Self::File(_) => Kind::File,
        }
    }
}

/// Kind-specific node data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A directory and its children, ordered by path
    Directory {
        /// Child ids, strictly increasing by path
        children: Vec<NodeId>,
    },
    /// A file and its payload
    File {
        /// The file's payload
        contents: FileContents,
    },
}

/// A node of the file tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    path: FtPath,
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl Node {
    /// Returns the node's absolute path.
    #[must_use]
    pub const fn path(&self) -> &FtPath {
        &self.path
    }

    /// Returns the parent id, or `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns whether this node is a directory or a file.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self.kind {
            NodeKind::Directory { .. } => Kind::Directory,
            NodeKind::File { .. } => Kind::File,
        }
    }

    /// Returns the kind-specific data.
    #[must_use]
    pub const fn data(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns `true` if this node is a file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    /// Returns the children in path order. Files have none.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    /// Returns the file contents, or `None` for a directory.
    #[must_use]
    pub const fn contents(&self) -> Option<&FileContents> {
        match &self.kind {
            NodeKind::File { contents } => Some(contents),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Returns the file contents mutably, or `None` for a directory.
    pub const fn contents_mut(&mut self) -> Option<&mut FileContents> {
        match &mut self.kind {
            NodeKind::File { contents } => Some(contents),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Orders two nodes by path.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }

    #[cfg(test)]
    pub(crate) fn corrupt_path(&mut self, path: FtPath) {
        self.path = path;
    }

    #[cfg(test)]
    pub(crate) const fn corrupt_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    #[cfg(test)]
    pub(crate) fn corrupt_children(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }
}

/// Owner of every node in a tree.
///
/// An optional node budget caps how many nodes may be live at once.
/// Creating a node past the budget fails with `FtError::OutOfMemory`,
/// exactly like a failed allocation.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
    max_nodes: Option<usize>,
}

impl NodeArena {
    /// Creates an empty arena without a node budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena holding at most `max_nodes` live nodes.
    #[must_use]
    pub fn with_budget(max_nodes: Option<usize>) -> Self {
        Self {
            max_nodes,
            ..Self::default()
        }
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Looks up a node mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Iterates over every live node id, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Creates a node and links it under `parent`.
    ///
    /// The new node is placed in the parent's child list at its sorted
    /// position.
    ///
    /// # Errors
    ///
    /// Checks run in this order:
    /// - `FtError::NoSuchPath` if `parent` does not resolve
    /// - `FtError::ConflictingPath` if the parent's path is not a prefix of `path`
    /// - `FtError::NoSuchPath` if `path` is not exactly one level below the parent
    /// - `FtError::NotADirectory` if the parent is a file
    /// - `FtError::AlreadyInTree` if the parent already has a child at `path`,
    ///   of either kind
    /// - `FtError::NoSuchPath` if there is no parent and `path` is deeper than one level
    /// - `FtError::OutOfMemory` if the node budget is exhausted or the
    ///   child list cannot grow
    pub fn create(&mut self, path: FtPath, parent: Option<NodeId>, new: NewNode) -> Result<NodeId> {
        let index = match parent {
            Some(parent_id) => Some((parent_id, self.insertion_index(&path, parent_id)?)),
            None => {
                if path.depth() != 1 {
                    return Err(FtError::NoSuchPath {
                        path: path.to_string(),
                    });
                }
                None
            }
        };

        if self.max_nodes.is_some_and(|max| self.nodes.len() >= max) {
            return Err(FtError::OutOfMemory {
                path: path.to_string(),
            });
        }
        if self.nodes.try_reserve(1).is_err() {
            return Err(FtError::OutOfMemory {
                path: path.to_string(),
            });
        }

        let id = NodeId(self.next_id);
        if let Some((parent_id, index)) = index {
            let Some(NodeKind::Directory { children }) =
                self.nodes.get_mut(&parent_id).map(|node| &mut node.kind)
            else {
                return Err(FtError::NotADirectory {
                    path: path.to_string(),
                });
            };
            if children.try_reserve(1).is_err() {
                return Err(FtError::OutOfMemory {
                    path: path.to_string(),
                });
            }
            children.insert(index, id);
        }
        self.next_id += 1;

        trace!(path = %path, kind = %new.kind(), id = %id, "created node");
        let kind = match new {
            NewNode::Directory => NodeKind::Directory {
                children: Vec::new(),
            },
            NewNode::File(contents) => NodeKind::File { contents },
        };
        self.nodes.insert(id, Node { path, parent, kind });
        Ok(id)
    }

    /// Validates `path` as a new child of `parent_id` and returns its
    /// sorted position.
    fn insertion_index(&self, path: &FtPath, parent_id: NodeId) -> Result<usize> {
        let parent = self.get(parent_id).ok_or_else(|| FtError::NoSuchPath {
            path: path.to_string(),
        })?;
        let parent_depth = parent.path.depth();

        if !path.starts_with(&parent.path) {
            return Err(FtError::ConflictingPath {
                path: path.to_string(),
            });
        }
        if path.depth() != parent_depth + 1 {
            return Err(FtError::NoSuchPath {
                path: path.to_string(),
            });
        }

        let NodeKind::Directory { children } = &parent.kind else {
            return Err(FtError::NotADirectory {
                path: parent.path.to_string(),
            });
        };
        match self.search(children, path.as_str()) {
            Ok(_) => Err(FtError::AlreadyInTree {
                path: path.to_string(),
            }),
            Err(index) => Ok(index),
        }
    }

    /// Binary-searches a child list by path text.
    ///
    /// `Ok(index)` locates the matching child; `Err(index)` is where a child
    /// with that path would be inserted.
    fn search(&self, children: &[NodeId], probe: &str) -> std::result::Result<usize, usize> {
        children.binary_search_by(|id| {
            self.nodes
                .get(id)
                .map_or(Ordering::Less, |child| child.path.compare_str(probe))
        })
    }

    /// Looks for a child of `parent` at `path` with the given kind.
    ///
    /// Returns whether such a child exists, together with an index into the
    /// parent's ordered child list: the child's position when it exists at
    /// that path, otherwise the position a child with that path would be
    /// inserted at. A file parent reports `(false, 0)`.
    #[must_use]
    pub fn has_child(&self, parent: NodeId, path: &FtPath, kind: Kind) -> (bool, usize) {
        let Some(node) = self.get(parent) else {
            return (false, 0);
        };
        match self.search(node.children(), path.as_str()) {
            Ok(index) => {
                let matches = node
                    .children()
                    .get(index)
                    .and_then(|id| self.get(*id))
                    .is_some_and(|child| child.kind() == kind);
                (matches, index)
            }
            Err(index) => (false, index),
        }
    }

    /// Returns the child of `parent` at `path`, whatever its kind.
    #[must_use]
    pub fn find_child(&self, parent: NodeId, path: &FtPath) -> Option<NodeId> {
        let node = self.get(parent)?;
        let index = self.search(node.children(), path.as_str()).ok()?;
        node.children().get(index).copied()
    }

    /// Returns the `index`-th child of `parent` among children of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `FtError::NoSuchPath` if `parent` does not resolve or has
    /// fewer than `index + 1` children of that kind.
    pub fn child(&self, parent: NodeId, index: usize, kind: Kind) -> Result<NodeId> {
        let node = self.resolve(parent)?;
        node.children()
            .iter()
            .copied()
            .filter(|id| self.get(*id).is_some_and(|child| child.kind() == kind))
            .nth(index)
            .ok_or_else(|| FtError::NoSuchPath {
                path: node.path.to_string(),
            })
    }

    /// Returns the `index`-th child of `parent` in path order.
    ///
    /// # Errors
    ///
    /// Returns `FtError::NoSuchPath` if `parent` does not resolve or the
    /// index is out of range.
    pub fn child_at(&self, parent: NodeId, index: usize) -> Result<NodeId> {
        let node = self.resolve(parent)?;
        node.children()
            .get(index)
            .copied()
            .ok_or_else(|| FtError::NoSuchPath {
                path: node.path.to_string(),
            })
    }

    /// Counts the children of `parent`, optionally only those of one kind.
    #[must_use]
    pub fn num_children(&self, parent: NodeId, kind: Option<Kind>) -> usize {
        let Some(node) = self.get(parent) else {
            return 0;
        };
        match kind {
            None => node.children().len(),
            Some(kind) => node
                .children()
                .iter()
                .filter(|id| self.get(**id).is_some_and(|child| child.kind() == kind))
                .count(),
        }
    }

    /// Returns the parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// Returns the path of `id`.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Option<&FtPath> {
        self.get(id).map(Node::path)
    }

    /// Orders two nodes by path. Unresolvable ids yield `None`.
    #[must_use]
    pub fn compare(&self, first: NodeId, second: NodeId) -> Option<Ordering> {
        Some(self.get(first)?.compare(self.get(second)?))
    }

    /// Frees `id` and its whole subtree.
    ///
    /// The node is first unlinked from its parent, then its file children
    /// and directory children are freed (post-order), then the node itself.
    /// Returns how many nodes were freed; an unknown id frees nothing.
    pub fn free(&mut self, id: NodeId) -> usize {
        self.detach(id);
        let freed = self.release(id);
        trace!(id = %id, freed, "freed subtree");
        freed
    }

    fn detach(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let Some(parent_id) = node.parent else {
            return;
        };
        let position = self
            .nodes
            .get(&parent_id)
            .and_then(|parent| self.search(parent.children(), node.path.as_str()).ok());

        if let (Some(index), Some(NodeKind::Directory { children })) = (
            position,
            self.nodes.get_mut(&parent_id).map(|parent| &mut parent.kind),
        ) && children.get(index) == Some(&id)
        {
            children.remove(index);
        }
    }

    fn release(&mut self, id: NodeId) -> usize {
        let mut pending = vec![id];
        let mut released = Vec::new();

        while let Some(id) = pending.pop() {
            let Some(node) = self.nodes.remove(&id) else {
                continue;
            };
            if let NodeKind::Directory { children } = &node.kind {
                let (files, directories): (Vec<NodeId>, Vec<NodeId>) = children
                    .iter()
                    .copied()
                    .partition(|child| self.nodes.get(child).is_some_and(Node::is_file));
                pending.extend(files);
                pending.extend(directories);
            }
            released.push(node);
        }

        // Reversed, the visit order is post-order with files before
        // directories; the vector drops its nodes front to back.
        released.reverse();
        released.len()
    }

    fn resolve(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or_else(|| FtError::NoSuchPath {
            path: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> FtPath {
        FtPath::new(raw).unwrap()
    }

    fn root_with_children(nodes: &mut NodeArena) -> NodeId {
        let root = nodes.create(path("r"), None, NewNode::Directory).unwrap();
        nodes.create(path("r/c"), Some(root), NewNode::Directory).unwrap();
        nodes.create(path("r/a"), Some(root), NewNode::Directory).unwrap();
        nodes
            .create(path("r/b"), Some(root), NewNode::File("b".into()))
            .unwrap();
        root
    }

    #[test]
    fn test_create_root() {
        let mut nodes = NodeArena::new();
        let root = nodes.create(path("r"), None, NewNode::Directory).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes.parent(root), None);
        assert_eq!(nodes.path(root).unwrap().as_str(), "r");
    }

    #[test]
    fn test_create_root_too_deep() {
        let mut nodes = NodeArena::new();
        let result = nodes.create(path("r/x"), None, NewNode::Directory);
        assert!(result.unwrap_err().is_no_such_path());
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_create_keeps_children_sorted() {
        let mut nodes = NodeArena::new();
        let root = root_with_children(&mut nodes);
        let names: Vec<_> = nodes
            .get(root)
            .unwrap()
            .children()
            .iter()
            .map(|id| nodes.path(*id).unwrap().as_str().to_string())
            .collect();
        assert_eq!(names, vec!["r/a", "r/b", "r/c"]);
    }

    #[test]
    fn test_create_parent_not_ancestor() {
        let mut nodes = NodeArena::new();
        let root = nodes.create(path("r"), None, NewNode::Directory).unwrap();
        let result = nodes.create(path("q/x"), Some(root), NewNode::Directory);
        assert!(result.unwrap_err().is_conflicting_path());
    }

    #[test]
    fn test_create_skipping_a_level() {
        let mut nodes = NodeArena::new();
        let root = nodes.create(path("r"), Some(NodeId(99)), NewNode::Directory);
        assert!(root.unwrap_err().is_no_such_path());

        let root = nodes.create(path("r"), None, NewNode::Directory).unwrap();
        let result = nodes.create(path("r/x/y"), Some(root), NewNode::Directory);
        assert!(result.unwrap_err().is_no_such_path());
    }

    #[test]
    fn test_create_duplicate_any_kind() {
        let mut nodes = NodeArena::new();
        let root = root_with_children(&mut nodes);
        let dup_dir = nodes.create(path("r/a"), Some(root), NewNode::Directory);
        assert!(dup_dir.unwrap_err().is_already_in_tree());
        let file_over_dir = nodes.create(path("r/a"), Some(root), NewNode::File(FileContents::empty()));
        assert!(file_over_dir.unwrap_err().is_already_in_tree());
        let dir_over_file = nodes.create(path("r/b"), Some(root), NewNode::Directory);
        assert!(dir_over_file.unwrap_err().is_already_in_tree());
        assert_eq!(nodes.len(), 4);
    }

    #[test]
    fn test_create_under_file() {
        let mut nodes = NodeArena::new();
        let root = nodes.create(path("r"), None, NewNode::Directory).unwrap();
        let file = nodes
            .create(path("r/f"), Some(root), NewNode::File(FileContents::empty()))
            .unwrap();
        let result = nodes.create(path("r/f/x"), Some(file), NewNode::Directory);
        assert!(matches!(result, Err(FtError::NotADirectory { .. })));
    }

    #[test]
    fn test_create_respects_budget() {
        let mut nodes = NodeArena::with_budget(Some(2));
        let root = nodes.create(path("r"), None, NewNode::Directory).unwrap();
        nodes.create(path("r/a"), Some(root), NewNode::Directory).unwrap();
        let result = nodes.create(path("r/b"), Some(root), NewNode::Directory);
        assert!(result.unwrap_err().is_out_of_memory());
        assert_eq!(nodes.num_children(root, None), 1);
    }

    #[test]
    fn test_has_child_found_and_insertion_point() {
        let mut nodes = NodeArena::new();
        let root = root_with_children(&mut nodes);

        assert_eq!(nodes.has_child(root, &path("r/a"), Kind::Directory), (true, 0));
        assert_eq!(nodes.has_child(root, &path("r/b"), Kind::File), (true, 1));
        // right path, wrong kind
        assert_eq!(nodes.has_child(root, &path("r/b"), Kind::Directory), (false, 1));
        // absent: insertion points
        assert_eq!(nodes.has_child(root, &path("r/0"), Kind::File), (false, 0));
        assert_eq!(nodes.has_child(root, &path("r/bb"), Kind::File), (false, 2));
        assert_eq!(nodes.has_child(root, &path("r/z"), Kind::Directory), (false, 3));
    }

    #[test]
    fn test_child_by_kind() {
        let mut nodes = NodeArena::new();
        let root = root_with_children(&mut nodes);

        let first_dir = nodes.child(root, 0, Kind::Directory).unwrap();
        let second_dir = nodes.child(root, 1, Kind::Directory).unwrap();
        let only_file = nodes.child(root, 0, Kind::File).unwrap();
        assert_eq!(nodes.path(first_dir).unwrap().as_str(), "r/a");
        assert_eq!(nodes.path(second_dir).unwrap().as_str(), "r/c");
        assert_eq!(nodes.path(only_file).unwrap().as_str(), "r/b");
        assert!(nodes.child(root, 1, Kind::File).unwrap_err().is_no_such_path());
        assert!(nodes.child_at(root, 3).unwrap_err().is_no_such_path());
    }

    #[test]
    fn test_num_children() {
        let mut nodes = NodeArena::new();
        let root = root_with_children(&mut nodes);
        assert_eq!(nodes.num_children(root, None), 3);
        assert_eq!(nodes.num_children(root, Some(Kind::Directory)), 2);
        assert_eq!(nodes.num_children(root, Some(Kind::File)), 1);
    }

    #[test]
    fn test_compare() {
        let mut nodes = NodeArena::new();
        let root = root_with_children(&mut nodes);
        let a = nodes.child(root, 0, Kind::Directory).unwrap();
        let c = nodes.child(root, 1, Kind::Directory).unwrap();
        assert_eq!(nodes.compare(a, c), Some(Ordering::Less));
        assert_eq!(nodes.compare(c, a), Some(Ordering::Greater));
        assert_eq!(nodes.compare(a, a), Some(Ordering::Equal));
    }

    #[test]
    fn test_file_accessors() {
        let mut nodes = NodeArena::new();
        let root = nodes.create(path("r"), None, NewNode::Directory).unwrap();
        let file = nodes
            .create(path("r/f"), Some(root), NewNode::File("abc".into()))
            .unwrap();

        assert!(nodes.get(file).unwrap().is_file());
        assert!(nodes.get(root).unwrap().contents().is_none());

        let contents = nodes.get_mut(file).unwrap().contents_mut().unwrap();
        contents.set_data(Some(b"wxyz".to_vec()));
        contents.set_len(4);
        assert_eq!(nodes.get(file).unwrap().contents().unwrap().len(), 4);
    }

    #[test]
    fn test_free_leaf_detaches() {
        let mut nodes = NodeArena::new();
        let root = root_with_children(&mut nodes);
        let file = nodes.child(root, 0, Kind::File).unwrap();

        assert_eq!(nodes.free(file), 1);
        assert_eq!(nodes.num_children(root, None), 2);
        assert!(nodes.get(file).is_none());
    }

    #[test]
    fn test_free_subtree() {
        let mut nodes = NodeArena::new();
        let root = root_with_children(&mut nodes);
        let a = nodes.child(root, 0, Kind::Directory).unwrap();
        let deep = nodes.create(path("r/a/x"), Some(a), NewNode::Directory).unwrap();
        nodes
            .create(path("r/a/x/f"), Some(deep), NewNode::File(FileContents::empty()))
            .unwrap();

        assert_eq!(nodes.free(a), 3);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes.num_children(root, None), 2);
        let live: std::collections::HashSet<NodeId> = nodes.ids().collect();
        assert!(live.contains(&root));
        assert!(!live.contains(&a) && !live.contains(&deep));
        assert_eq!(nodes.free(root), 3);
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_free_deep_chain() {
        let depth = 20_000;
        let full = path(&vec!["d"; depth].join("/"));
        let mut nodes = NodeArena::new();
        let root = nodes.create(full.prefix(1).unwrap(), None, NewNode::Directory).unwrap();
        let mut parent = root;
        for level in 2..=depth {
            parent = nodes
                .create(full.prefix(level).unwrap(), Some(parent), NewNode::Directory)
                .unwrap();
        }
        nodes
            .create(path(&format!("{full}/f")), Some(parent), NewNode::File("x".into()))
            .unwrap();

        assert_eq!(nodes.free(root), depth + 1);
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_free_unknown_id() {
        let mut nodes = NodeArena::new();
        assert_eq!(nodes.free(NodeId(7)), 0);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut nodes = NodeArena::new();
        let first = nodes.create(path("r"), None, NewNode::Directory).unwrap();
        nodes.free(first);
        let second = nodes.create(path("r"), None, NewNode::Directory).unwrap();
        assert_ne!(first, second);
        assert!(nodes.get(first).is_none());
    }
}
