//! Opaque file payloads.
//!
//! The tree never looks inside a file: it stores whatever bytes the caller
//! hands over together with the length the caller declares for them.
//!
//! # Examples
//!
//! ```
//! use ft_core::FileContents;
//!
//! let contents = FileContents::from("hello");
//! assert_eq!(contents.data(), Some(&b"hello"[..]));
//! assert_eq!(contents.len(), 5);
//!
//! let empty = FileContents::empty();
//! assert_eq!(empty.data(), None);
//! assert!(empty.is_empty());
//! ```

use serde::Serialize;

/// The payload of a file node.
///
/// `data` may be absent (a file inserted with no payload). `length` is the
/// caller-declared size in bytes and is reported by `stat`; it is taken at
/// face value and not checked against `data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileContents {
    data: Option<Vec<u8>>,
    length: usize,
}

impl FileContents {
    /// Creates contents from a payload and its declared length.
    #[must_use]
    pub const fn new(data: Option<Vec<u8>>, length: usize) -> Self {
        Self { data, length }
    }

    /// Creates contents with no payload and zero length.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            data: None,
            length: 0,
        }
    }

    /// Returns the payload, if any.
    #[must_use]
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Returns the declared length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the declared length is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Replaces the payload, returning the previous one.
    pub const fn set_data(&mut self, data: Option<Vec<u8>>) -> Option<Vec<u8>> {
        std::mem::replace(&mut self.data, data)
    }

    /// Sets the declared length.
    pub const fn set_len(&mut self, length: usize) {
        self.length = length;
    }

    /// Consumes the contents, returning the payload.
    #[must_use]
    pub fn into_data(self) -> Option<Vec<u8>> {
        self.data
    }
}

impl From<Vec<u8>> for FileContents {
    fn from(data: Vec<u8>) -> Self {
        let length = data.len();
        Self::new(Some(data), length)
    }
}

impl From<&[u8]> for FileContents {
    fn from(data: &[u8]) -> Self {
        Self::from(data.to_vec())
    }
}

impl From<&str> for FileContents {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}
