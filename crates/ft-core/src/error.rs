//! Error and status types for the file tree.
//!
//! Every fallible tree operation reports one of the [`FtError`] variants.
//! Each variant maps onto a stable [`Status`] code so callers that only care
//! about the outcome class (for example a script runner printing
//! `NO_SUCH_PATH`) do not need to match on the error payload.
//!
//! # Examples
//!
//! ```
//! use ft_core::{FtError, Status};
//!
//! let error = FtError::NoSuchPath {
//!     path: "a/b".to_string(),
//! };
//!
//! assert!(error.is_no_such_path());
//! assert_eq!(error.status(), Status::NoSuchPath);
//! assert_eq!(error.status().as_str(), "NO_SUCH_PATH");
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during file tree operations.
///
/// Variants that concern a particular path carry it, so diagnostics can
/// name the offending entry without the caller having to keep it around.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FtError {
    /// The tree has not been initialized with `init`
    #[error("file tree is not initialized")]
    NotInitialized,

    /// `init` was called on a tree that is already initialized
    #[error("file tree is already initialized")]
    AlreadyInitialized,

    /// The path string is not a well-formed path
    #[error("bad path: {path:?}")]
    BadPath {
        /// The rejected path string
        path: String,
    },

    /// The path does not lie underneath the tree's root
    #[error("conflicting path: {path}")]
    ConflictingPath {
        /// The conflicting path
        path: String,
    },

    /// No node exists at the path
    #[error("no such path: {path}")]
    NoSuchPath {
        /// The path that was not found
        path: String,
    },

    /// A node already exists at the path
    #[error("already in tree: {path}")]
    AlreadyInTree {
        /// The path that is already taken
        path: String,
    },

    /// The path names a directory where a file was required
    #[error("not a file: {path}")]
    NotAFile {
        /// The path that is a directory
        path: String,
    },

    /// The path names (or passes through) a file where a directory was required
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that is a file
        path: String,
    },

    /// A node could not be allocated
    #[error("out of memory while creating {path}")]
    OutOfMemory {
        /// The path whose node could not be allocated
        path: String,
    },
}

impl FtError {
    /// Returns the status code for this error.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::NotInitialized => Status::NotInitialized,
            Self::AlreadyInitialized => Status::AlreadyInitialized,
            Self::BadPath { .. } => Status::BadPath,
            Self::ConflictingPath { .. } => Status::ConflictingPath,
            Self::NoSuchPath { .. } => Status::NoSuchPath,
            Self::AlreadyInTree { .. } => Status::AlreadyInTree,
            Self::NotAFile { .. } => Status::NotAFile,
            Self::NotADirectory { .. } => Status::NotADirectory,
            Self::OutOfMemory { .. } => Status::OutOfMemory,
        }
    }

    /// Returns the path this error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NotInitialized | Self::AlreadyInitialized => None,
            Self::BadPath { path }
            | Self::ConflictingPath { path }
            | Self::NoSuchPath { path }
            | Self::AlreadyInTree { path }
            | Self::NotAFile { path }
            | Self::NotADirectory { path }
            | Self::OutOfMemory { path } => Some(path),
        }
    }

    /// Returns `true` if this is a bad path error.
    ///
    /// # Examples
    ///
    /// ```
    /// use ft_core::FtError;
    ///
    /// let error = FtError::BadPath {
    ///     path: "/leading".to_string(),
    /// };
    ///
    /// assert!(error.is_bad_path());
    /// ```
    #[must_use]
    pub const fn is_bad_path(&self) -> bool {
        matches!(self, Self::BadPath { .. })
    }

    /// Returns `true` if this is a conflicting path error.
    #[must_use]
    pub const fn is_conflicting_path(&self) -> bool {
        matches!(self, Self::ConflictingPath { .. })
    }

    /// Returns `true` if this is a no such path error.
    #[must_use]
    pub const fn is_no_such_path(&self) -> bool {
        matches!(self, Self::NoSuchPath { .. })
    }

    /// Returns `true` if this is an already in tree error.
    #[must_use]
    pub const fn is_already_in_tree(&self) -> bool {
        matches!(self, Self::AlreadyInTree { .. })
    }

    /// Returns `true` if this is a kind mismatch (`NotAFile` or `NotADirectory`).
    #[must_use]
    pub const fn is_kind_mismatch(&self) -> bool {
        matches!(self, Self::NotAFile { .. } | Self::NotADirectory { .. })
    }

    /// Returns `true` if this is an allocation failure.
    #[must_use]
    pub const fn is_out_of_memory(&self) -> bool {
        matches!(self, Self::OutOfMemory { .. })
    }
}

/// Outcome class of a file tree operation.
///
/// `Success` has no error counterpart; it exists so that drivers can report
/// every outcome with the same vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// The operation completed
    Success,
    /// See [`FtError::NotInitialized`]
    NotInitialized,
    /// See [`FtError::AlreadyInitialized`]
    AlreadyInitialized,
    /// See [`FtError::BadPath`]
    BadPath,
    /// See [`FtError::ConflictingPath`]
    ConflictingPath,
    /// See [`FtError::NoSuchPath`]
    NoSuchPath,
    /// See [`FtError::AlreadyInTree`]
    AlreadyInTree,
    /// See [`FtError::NotAFile`]
    NotAFile,
    /// See [`FtError::NotADirectory`]
    NotADirectory,
    /// See [`FtError::OutOfMemory`]
    OutOfMemory,
}

impl Status {
    /// Returns the stable upper-case name of the status.
    ///
    /// # Examples
    ///
    /// ```
    /// use ft_core::Status;
    ///
    /// assert_eq!(Status::Success.as_str(), "SUCCESS");
    /// assert_eq!(Status::AlreadyInTree.as_str(), "ALREADY_IN_TREE");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            Self::BadPath => "BAD_PATH",
            Self::ConflictingPath => "CONFLICTING_PATH",
            Self::NoSuchPath => "NO_SUCH_PATH",
            Self::AlreadyInTree => "ALREADY_IN_TREE",
            Self::NotAFile => "NOT_A_FILE",
            Self::NotADirectory => "NOT_A_DIRECTORY",
            Self::OutOfMemory => "OUT_OF_MEMORY",
        }
    }

    /// Returns the status of an operation result.
    #[must_use]
    pub const fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(error) => error.status(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type alias for file tree operation results.
pub type Result<T> = std::result::Result<T, FtError>;
