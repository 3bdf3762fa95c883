//! Builder pattern for constructing file trees.
//!
//! Provides a fluent API for building an initialized [`FileTree`] from a
//! list of directories and files.
//!
//! # Examples
//!
//! ```
//! use ft_core::TreeBuilder;
//!
//! let tree = TreeBuilder::new()
//!     .add_dir("proj/src")
//!     .add_file("proj/README", "hello")
//!     .build()?;
//!
//! assert_eq!(tree.count(), 3);
//! assert!(tree.contains_file("proj/README"));
//! # Ok::<(), ft_core::FtError>(())
//! ```

use crate::config::TreeConfig;
use crate::contents::FileContents;
use crate::error::{FtError, Result};
use crate::tree::FileTree;

/// Builder for constructing an initialized [`FileTree`].
///
/// Entries are inserted in the order they are added. Failures are
/// collected and the first one is returned from [`TreeBuilder::build`];
/// a builder that saw any failure never yields a tree.
#[derive(Debug)]
pub struct TreeBuilder {
    tree: FileTree,
    errors: Vec<FtError>,
}

impl TreeBuilder {
    /// Creates a builder for a tree with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use ft_core::TreeBuilder;
    ///
    /// let tree = TreeBuilder::new().build().unwrap();
    /// assert!(tree.is_initialized());
    /// assert_eq!(tree.count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Creates a builder for a tree with the given configuration.
    #[must_use]
    pub fn with_config(config: TreeConfig) -> Self {
        let mut tree = FileTree::with_config(config);
        let errors = tree.init().err().into_iter().collect();
        Self { tree, errors }
    }

    /// Adds a directory and any missing ancestors.
    #[must_use]
    pub fn add_dir(mut self, path: &str) -> Self {
        if let Err(e) = self.tree.insert_dir(path) {
            self.errors.push(e);
        }
        self
    }

    /// Adds a file and any missing ancestor directories.
    ///
    /// # Examples
    ///
    /// ```
    /// use ft_core::TreeBuilder;
    ///
    /// let tree = TreeBuilder::new()
    ///     .add_file("r/notes", "text")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(tree.get_file_contents("r/notes").unwrap().len(), 4);
    /// ```
    #[must_use]
    pub fn add_file(mut self, path: &str, contents: impl Into<FileContents>) -> Self {
        if let Err(e) = self.tree.insert_file(path, contents.into()) {
            self.errors.push(e);
        }
        self
    }

    /// Adds several directories at once.
    #[must_use]
    pub fn add_dirs<'a>(self, paths: impl IntoIterator<Item = &'a str>) -> Self {
        paths.into_iter().fold(self, Self::add_dir)
    }

    /// Adds several files at once.
    #[must_use]
    pub fn add_files<'a, C>(self, files: impl IntoIterator<Item = (&'a str, C)>) -> Self
    where
        C: Into<FileContents>,
    {
        files
            .into_iter()
            .fold(self, |builder, (path, contents)| builder.add_file(path, contents))
    }

    /// Returns the number of nodes inserted so far.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.tree.count()
    }

    /// Consumes the builder and returns the constructed tree.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered while adding entries, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ft_core::TreeBuilder;
    ///
    /// let result = TreeBuilder::new()
    ///     .add_dir("a/b")
    ///     .add_dir("z/other-root")
    ///     .build();
    ///
    /// assert!(result.unwrap_err().is_conflicting_path());
    /// ```
    pub fn build(self) -> Result<FileTree> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        Ok(self.tree)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
