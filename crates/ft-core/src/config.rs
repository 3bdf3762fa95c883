//! Configuration for a file tree instance.
//!
//! # Examples
//!
//! ```
//! use ft_core::TreeConfig;
//!
//! let config = TreeConfig::default();
//! assert_eq!(config.max_nodes, None);
//!
//! let limited = TreeConfig::builder().max_nodes(16).self_check(true).build();
//! assert_eq!(limited.max_nodes, Some(16));
//! assert!(limited.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

/// Settings applied when a [`FileTree`](crate::FileTree) is created.
///
/// Deserializes from a table such as:
///
/// ```toml
/// max_nodes = 4096
/// self_check = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Maximum number of live nodes.
    ///
    /// Creating a node beyond this limit fails with
    /// `FtError::OutOfMemory`, which also makes allocation failure
    /// reproducible in tests.
    /// Default: None (unlimited)
    pub max_nodes: Option<usize>,

    /// Run the invariant checker after every successful mutation.
    ///
    /// Violations are logged at error level; the tree is never repaired.
    /// Default: on in debug builds, off in release builds
    pub self_check: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_nodes: None,
            self_check: cfg!(debug_assertions),
        }
    }
}

impl TreeConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> TreeConfigBuilder {
        TreeConfigBuilder::new()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_nodes` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ft_core::TreeConfig;
    ///
    /// let invalid = TreeConfig {
    ///     max_nodes: Some(0),
    ///     ..Default::default()
    /// };
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if self.max_nodes == Some(0) {
            return Err("max_nodes must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Builder for [`TreeConfig`].
#[derive(Debug, Clone, Default)]
pub struct TreeConfigBuilder {
    config: TreeConfig,
}

impl TreeConfigBuilder {
    /// Creates a builder starting from the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node budget.
    #[must_use]
    pub const fn max_nodes(mut self, max_nodes: usize) -> Self {
        self.config.max_nodes = Some(max_nodes);
        self
    }

    /// Enables or disables the post-mutation invariant check.
    #[must_use]
    pub const fn self_check(mut self, enabled: bool) -> Self {
        self.config.self_check = enabled;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> TreeConfig {
        self.config
    }
}
