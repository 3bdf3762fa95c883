//! Validated hierarchical path names.
//!
//! An [`FtPath`] is a non-empty sequence of non-empty components joined by
//! `/`. Paths are written without a leading slash: `"root/dir/file"`.
//!
//! # Examples
//!
//! ```
//! use ft_core::FtPath;
//!
//! let path = FtPath::new("1root/2child/3gkid")?;
//! assert_eq!(path.depth(), 3);
//! assert_eq!(path.prefix(2)?.as_str(), "1root/2child");
//! assert_eq!(path.name(), "3gkid");
//! # Ok::<(), ft_core::FtError>(())
//! ```

use crate::error::{FtError, Result};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// Component delimiter.
pub const DELIMITER: char = '/';

/// A validated file tree path.
///
/// The text and the byte offset at which each component ends are shared
/// between a path and every prefix taken from it, so [`FtPath::prefix`] is
/// O(1) and a chain of ancestors costs no more memory than its deepest path.
///
/// Ordering compares the canonical strings byte-wise. Siblings share their
/// parent's prefix, so among siblings this is the order of their names.
#[derive(Clone)]
pub struct FtPath {
    text: Arc<str>,
    ends: Arc<[usize]>,
    depth: usize,
    len: usize,
}

impl FtPath {
    /// Parses a path string.
    ///
    /// # Errors
    ///
    /// Returns `FtError::BadPath` if the string is empty, starts or ends with
    /// `/`, or contains an empty component (`//`).
    ///
    /// # Examples
    ///
    /// ```
    /// use ft_core::FtPath;
    ///
    /// assert!(FtPath::new("a/b").is_ok());
    /// assert!(FtPath::new("").is_err());
    /// assert!(FtPath::new("/a/b").is_err());
    /// assert!(FtPath::new("a/b/").is_err());
    /// assert!(FtPath::new("a//b").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self> {
        let mut ends = Vec::new();
        let mut offset = 0;

        for component in raw.split(DELIMITER) {
            if component.is_empty() {
                return Err(FtError::BadPath {
                    path: raw.to_string(),
                });
            }
            offset += component.len();
            ends.push(offset);
            offset += DELIMITER.len_utf8();
        }

        Ok(Self {
            text: Arc::from(raw),
            depth: ends.len(),
            ends: ends.into(),
            len: raw.len(),
        })
    }

    /// Returns the number of components.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the path formed by the first `depth` components.
    ///
    /// # Errors
    ///
    /// Returns `FtError::NoSuchPath` if `depth` is zero or exceeds this
    /// path's depth.
    pub fn prefix(&self, depth: usize) -> Result<Self> {
        if depth == 0 || depth > self.depth {
            return Err(FtError::NoSuchPath {
                path: self.to_string(),
            });
        }
        Ok(Self {
            text: Arc::clone(&self.text),
            ends: Arc::clone(&self.ends),
            depth,
            len: self.ends[depth - 1],
        })
    }

    /// Returns the number of leading components shared with `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ft_core::FtPath;
    ///
    /// let a = FtPath::new("r/x/y")?;
    /// let b = FtPath::new("r/x/z/w")?;
    /// assert_eq!(a.shared_prefix_depth(&b), 2);
    /// # Ok::<(), ft_core::FtError>(())
    /// ```
    #[must_use]
    pub fn shared_prefix_depth(&self, other: &Self) -> usize {
        self.components()
            .zip(other.components())
            .take_while(|(left, right)| left == right)
            .count()
    }

    /// Returns `true` if `prefix` is this path or one of its ancestors.
    ///
    /// Compares whole components: `r/ab` does not start with `r/a`.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        prefix.depth <= self.depth
            && self.ends[prefix.depth - 1] == prefix.len
            && self.as_str().starts_with(prefix.as_str())
    }

    /// Returns `true` if this path is a proper prefix of `other`.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.depth < other.depth && other.starts_with(self)
    }

    /// Iterates over the components in order.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.as_str().split(DELIMITER)
    }

    /// Returns the last component.
    #[must_use]
    pub fn name(&self) -> &str {
        let start = match self.depth {
            0 | 1 => 0,
            n => self.ends[n - 2] + DELIMITER.len_utf8(),
        };
        &self.text[start..self.len]
    }

    /// Compares the canonical text with a raw path string.
    ///
    /// Used to binary-search sibling collections without building an
    /// `FtPath` for the probe.
    #[must_use]
    pub fn compare_str(&self, other: &str) -> Ordering {
        self.as_str().cmp(other)
    }

    /// Returns the canonical text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text[..self.len]
    }
}

impl PartialEq for FtPath {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for FtPath {}

impl Hash for FtPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Ord for FtPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for FtPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for FtPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FtPath").field(&self.as_str()).finish()
    }
}

impl fmt::Display for FtPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FtPath {
    type Err = FtError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for FtPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for FtPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
