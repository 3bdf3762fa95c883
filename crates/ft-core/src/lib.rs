//! In-memory hierarchical file tree.
//!
//! Stores directories and files addressed by slash-delimited absolute paths
//! under a single root directory.
//!
//! # Architecture
//!
//! The core consists of:
//! - `FtPath`, a validated path value type
//! - `NodeArena`, the owner of every node, with sorted child lists
//! - `FileTree`, the caller-owned handle exposing the public operations
//! - `Checker`, a read-only structural invariant checker
//! - Error and status types, and the tree configuration

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;

pub mod builder;
pub mod checker;
pub mod contents;
pub mod node;
pub mod path;
pub mod tree;

pub use builder::TreeBuilder;
pub use checker::{Checker, Violation};
pub use config::{TreeConfig, TreeConfigBuilder};
pub use contents::FileContents;
pub use error::{FtError, Result, Status};
pub use node::{Kind, NewNode, Node, NodeArena, NodeId, NodeKind};
pub use path::{DELIMITER, FtPath};
pub use tree::{FileTree, Stat};
