//! The path-addressed file tree.
//!
//! A [`FileTree`] is a handle owned by the caller. It starts out
//! uninitialized; [`FileTree::init`] makes it usable and
//! [`FileTree::destroy`] frees every node and returns it to the
//! uninitialized state.
//!
//! Insertion creates missing intermediate directories one level at a time.
//! If any level fails, every node created by that call is freed again, so
//! an operation either succeeds completely or leaves the tree unchanged.
//!
//! # Examples
//!
//! ```
//! use ft_core::{FileTree, Stat};
//!
//! let mut tree = FileTree::new();
//! tree.init()?;
//!
//! tree.insert_dir("1root/2child/3gkid")?;
//! tree.insert_file("1root/2child/notes", "hello".into())?;
//!
//! assert!(tree.contains_dir("1root/2child"));
//! assert_eq!(tree.stat("1root/2child/notes")?, Stat::File { size: 5 });
//! assert_eq!(
//!     tree.serialize().as_deref(),
//!     Some("1root\n1root/2child\n1root/2child/notes\n1root/2child/3gkid\n")
//! );
//! # Ok::<(), ft_core::FtError>(())
//! ```

use crate::checker::Checker;
use crate::config::TreeConfig;
use crate::contents::FileContents;
use crate::error::{FtError, Result};
use crate::node::{Kind, NewNode, NodeArena, NodeId};
use crate::path::FtPath;
use serde::Serialize;
use std::fmt;
use tracing::{debug, error, trace, warn};

/// Result of [`FileTree::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Stat {
    /// The path is a directory
    Directory,
    /// The path is a file whose contents have the declared size
    File {
        /// Declared length of the contents in bytes
        size: usize,
    },
}

impl Stat {
    /// Returns `true` for a file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns the file size, or `None` for a directory.
    #[must_use]
    pub const fn size(&self) -> Option<usize> {
        match self {
            Self::File { size } => Some(*size),
            Self::Directory => None,
        }
    }
}

/// An in-memory hierarchy of directories and files.
///
/// # Thread Safety
///
/// `FileTree` is `Send` and `Sync`, but mutation takes `&mut self`; share
/// it between threads behind a lock.
#[derive(Debug, Clone)]
pub struct FileTree {
    initialized: bool,
    root: Option<NodeId>,
    count: usize,
    nodes: NodeArena,
    config: TreeConfig,
}

impl FileTree {
    /// Creates an uninitialized tree with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Creates an uninitialized tree with the given configuration.
    #[must_use]
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            initialized: false,
            root: None,
            count: 0,
            nodes: NodeArena::with_budget(config.max_nodes),
            config,
        }
    }

    /// Puts the tree into the initialized, empty state.
    ///
    /// # Errors
    ///
    /// Returns `FtError::AlreadyInitialized` if the tree is already initialized.
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Err(FtError::AlreadyInitialized);
        }
        self.initialized = true;
        self.root = None;
        self.count = 0;
        self.nodes = NodeArena::with_budget(self.config.max_nodes);
        debug!("file tree initialized");
        self.after_mutation("init");
        Ok(())
    }

    /// Frees every node and returns the tree to the uninitialized state.
    ///
    /// # Errors
    ///
    /// Returns `FtError::NotInitialized` if the tree is not initialized.
    pub fn destroy(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        if let Some(root) = self.root.take() {
            let freed = self.nodes.free(root);
            self.count = self.count.saturating_sub(freed);
            debug!(freed, "file tree destroyed");
        }
        self.initialized = false;
        self.after_mutation("destroy");
        Ok(())
    }

    /// Inserts a directory, creating any missing ancestors.
    ///
    /// # Errors
    ///
    /// - `FtError::NotInitialized` if the tree is not initialized
    /// - `FtError::BadPath` if `path` is malformed
    /// - `FtError::ConflictingPath` if `path` is not underneath the root
    /// - `FtError::NotADirectory` if an existing file lies on the way
    /// - `FtError::AlreadyInTree` if a node already exists at `path`
    /// - `FtError::OutOfMemory` if a node cannot be allocated
    pub fn insert_dir(&mut self, path: &str) -> Result<()> {
        self.insert(path, NewNode::Directory)
    }

    /// Inserts a file, creating any missing ancestor directories.
    ///
    /// A file can never be the root: inserting a single-component file
    /// path into an empty tree fails with `FtError::ConflictingPath`.
    ///
    /// # Errors
    ///
    /// Same as [`FileTree::insert_dir`].
    pub fn insert_file(&mut self, path: &str, contents: FileContents) -> Result<()> {
        self.insert(path, NewNode::File(contents))
    }

    /// Inserts a node of either kind at `path`.
    ///
    /// Intermediate levels are created as directories and the last level as
    /// `new`. On failure every node created by this call is freed.
    ///
    /// # Errors
    ///
    /// Same as [`FileTree::insert_dir`].
    pub fn insert(&mut self, path: &str, mut new: NewNode) -> Result<()> {
        self.ensure_initialized()?;
        let path = FtPath::new(path)?;
        let kind = new.kind();

        let ancestor = self.traverse(&path)?;
        if ancestor.is_none() && self.root.is_some() {
            return Err(FtError::ConflictingPath {
                path: path.to_string(),
            });
        }

        let first_level = match ancestor.and_then(|id| self.nodes.path(id)) {
            Some(ancestor_path) if ancestor_path == &path => {
                return Err(FtError::AlreadyInTree {
                    path: path.to_string(),
                });
            }
            Some(ancestor_path) => ancestor_path.depth() + 1,
            None if kind == Kind::File && path.depth() == 1 => {
                return Err(FtError::ConflictingPath {
                    path: path.to_string(),
                });
            }
            None => 1,
        };

        let depth = path.depth();
        let mut parent = ancestor;
        let mut first_new = None;
        let mut created = 0;

        for level in first_level..=depth {
            let step = if level == depth {
                std::mem::replace(&mut new, NewNode::Directory)
            } else {
                NewNode::Directory
            };
            let result = path
                .prefix(level)
                .and_then(|prefix| self.nodes.create(prefix, parent, step));

            match result {
                Ok(id) => {
                    first_new.get_or_insert(id);
                    parent = Some(id);
                    created += 1;
                }
                Err(error) => {
                    if let Some(first) = first_new {
                        let freed = self.nodes.free(first);
                        warn!(path = %path, level, freed, %error, "insert rolled back");
                    }
                    return Err(error);
                }
            }
        }

        if self.root.is_none() {
            self.root = first_new;
        }
        self.count += created;
        debug!(path = %path, %kind, created, count = self.count, "inserted");
        self.after_mutation("insert");
        Ok(())
    }

    /// Removes a directory and everything underneath it.
    ///
    /// # Errors
    ///
    /// - `FtError::NotInitialized` if the tree is not initialized
    /// - `FtError::BadPath` if `path` is malformed
    /// - `FtError::ConflictingPath` if `path` is not underneath the root
    /// - `FtError::NoSuchPath` if nothing exists at `path`
    /// - `FtError::NotADirectory` if `path` is a file
    pub fn rm_dir(&mut self, path: &str) -> Result<()> {
        self.remove(path, Kind::Directory)
    }

    /// Removes a file.
    ///
    /// # Errors
    ///
    /// As [`FileTree::rm_dir`], with `FtError::NotAFile` if `path` is a
    /// directory.
    pub fn rm_file(&mut self, path: &str) -> Result<()> {
        self.remove(path, Kind::File)
    }

    fn remove(&mut self, path: &str, kind: Kind) -> Result<()> {
        let id = self.find_node(path, Some(kind))?;
        let freed = self.nodes.free(id);
        self.count = self.count.saturating_sub(freed);
        if self.count == 0 {
            self.root = None;
        }
        debug!(path, %kind, freed, count = self.count, "removed");
        self.after_mutation("remove");
        Ok(())
    }

    /// Returns `true` if `path` exists and is a directory.
    ///
    /// Any failure (uninitialized tree, malformed path) yields `false`.
    #[must_use]
    pub fn contains_dir(&self, path: &str) -> bool {
        self.find_node(path, Some(Kind::Directory)).is_ok()
    }

    /// Returns `true` if `path` exists and is a file.
    ///
    /// Any failure (uninitialized tree, malformed path) yields `false`.
    #[must_use]
    pub fn contains_file(&self, path: &str) -> bool {
        self.find_node(path, Some(Kind::File)).is_ok()
    }

    /// Returns the contents of the file at `path`.
    ///
    /// Returns `None` if the tree is uninitialized, the path is malformed
    /// or missing, or it names a directory.
    #[must_use]
    pub fn get_file_contents(&self, path: &str) -> Option<&FileContents> {
        let id = self.find_node(path, Some(Kind::File)).ok()?;
        self.nodes.get(id)?.contents()
    }

    /// Replaces the contents of the file at `path`, returning the old ones.
    ///
    /// Returns `None`, leaving the tree untouched, under the same conditions
    /// as [`FileTree::get_file_contents`].
    pub fn replace_file_contents(
        &mut self,
        path: &str,
        contents: FileContents,
    ) -> Option<FileContents> {
        let id = self.find_node(path, Some(Kind::File)).ok()?;
        let slot = self.nodes.get_mut(id)?.contents_mut()?;
        let previous = std::mem::replace(slot, contents);
        debug!(path, size = previous.len(), "replaced file contents");
        Some(previous)
    }

    /// Reports whether `path` is a file or a directory, and a file's size.
    ///
    /// # Errors
    ///
    /// - `FtError::NotInitialized` if the tree is not initialized
    /// - `FtError::BadPath` if `path` is malformed
    /// - `FtError::ConflictingPath` if `path` is not underneath the root
    /// - `FtError::NotADirectory` if an existing file lies on the way
    /// - `FtError::NoSuchPath` if nothing exists at `path`
    pub fn stat(&self, path: &str) -> Result<Stat> {
        let id = self.find_node(path, None)?;
        let node = self.nodes.get(id).ok_or_else(|| FtError::NoSuchPath {
            path: path.to_string(),
        })?;
        Ok(node
            .contents()
            .map_or(Stat::Directory, |contents| Stat::File {
                size: contents.len(),
            }))
    }

    /// Lists the children of the directory at `path` in path order.
    ///
    /// # Errors
    ///
    /// As [`FileTree::rm_dir`].
    pub fn list_dir(&self, path: &str) -> Result<Vec<FtPath>> {
        let id = self.find_node(path, Some(Kind::Directory))?;
        let node = self.nodes.get(id).ok_or_else(|| FtError::NoSuchPath {
            path: path.to_string(),
        })?;
        Ok(node
            .children()
            .iter()
            .filter_map(|child| self.nodes.path(*child).cloned())
            .collect())
    }

    /// Renders the tree as one path per line, in pre-order.
    ///
    /// Within a directory, its files come first, then its subdirectories,
    /// each group in path order and each subdirectory followed by its own
    /// subtree. Every line ends with `\n`; an empty tree renders as `""`.
    /// Returns `None` if the tree is not initialized.
    #[must_use]
    pub fn serialize(&self) -> Option<String> {
        if !self.initialized {
            return None;
        }
        let mut out = String::new();
        self.write_tree(&mut out).ok()?;
        Some(out)
    }

    /// Writes the lines of [`FileTree::serialize`] to `out`.
    ///
    /// Writes nothing for an empty or uninitialized tree.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by `out`.
    pub fn write_tree<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let mut pending: Vec<NodeId> = self.root.into_iter().collect();

        while let Some(id) = pending.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.write_str(node.path().as_str())?;
            out.write_char('\n')?;

            // Pushed last, popped first.
            for kind in [Kind::Directory, Kind::File] {
                pending.extend(
                    node.children()
                        .iter()
                        .rev()
                        .copied()
                        .filter(|child| self.nodes.get(*child).is_some_and(|c| c.kind() == kind)),
                );
            }
        }
        Ok(())
    }

    /// Returns `true` between `init` and `destroy`.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Returns the root node, if the tree is not empty.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the node arena for read-only inspection.
    #[must_use]
    pub const fn nodes(&self) -> &NodeArena {
        &self.nodes
    }

    /// Returns the configuration the tree was created with.
    #[must_use]
    pub const fn config(&self) -> &TreeConfig {
        &self.config
    }

    const fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(FtError::NotInitialized)
        }
    }

    /// Walks from the root towards `path` as far as existing nodes allow.
    ///
    /// Returns the deepest node whose path is a prefix of `path` (possibly
    /// `path` itself, of either kind), or `None` for an empty tree.
    fn traverse(&self, path: &FtPath) -> Result<Option<NodeId>> {
        let Some(root) = self.root else {
            return Ok(None);
        };
        let root_path = self.nodes.path(root).ok_or_else(|| FtError::NoSuchPath {
            path: path.to_string(),
        })?;
        if root_path != &path.prefix(1)? {
            return Err(FtError::ConflictingPath {
                path: path.to_string(),
            });
        }

        let mut current = root;
        for level in 2..=path.depth() {
            if let Some(node) = self.nodes.get(current)
                && node.is_file()
            {
                return Err(FtError::NotADirectory {
                    path: node.path().to_string(),
                });
            }

            let prefix = path.prefix(level)?;
            match self.nodes.find_child(current, &prefix) {
                Some(child) => {
                    trace!(prefix = %prefix, "descended");
                    current = child;
                }
                None => break,
            }
        }
        Ok(Some(current))
    }

    /// Resolves `path` to a node, optionally requiring a kind.
    fn find_node(&self, path: &str, want: Option<Kind>) -> Result<NodeId> {
        self.ensure_initialized()?;
        let path = FtPath::new(path)?;

        let found = self.traverse(&path)?.ok_or_else(|| FtError::NoSuchPath {
            path: path.to_string(),
        })?;
        let node = self
            .nodes
            .get(found)
            .filter(|node| node.path() == &path)
            .ok_or_else(|| FtError::NoSuchPath {
                path: path.to_string(),
            })?;

        match (want, node.kind()) {
            (Some(Kind::File), Kind::Directory) => Err(FtError::NotAFile {
                path: path.to_string(),
            }),
            (Some(Kind::Directory), Kind::File) => Err(FtError::NotADirectory {
                path: path.to_string(),
            }),
            _ => Ok(found),
        }
    }

    fn after_mutation(&self, operation: &str) {
        if !self.config.self_check {
            return;
        }
        if let Err(violation) = Checker::check(self) {
            error!(operation, %violation, "file tree invariant violated");
        }
    }

    #[cfg(test)]
    pub(crate) const fn nodes_mut(&mut self) -> &mut NodeArena {
        &mut self.nodes
    }

    #[cfg(test)]
    pub(crate) const fn corrupt_state(&mut self, initialized: bool, count: usize) {
        self.initialized = initialized;
        self.count = count;
    }
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}
