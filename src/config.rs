//! Tree configuration.
//!
//! Everything here is fixed when a [`LayoutTree`](crate::LayoutTree) is
//! constructed and cannot change for the lifetime of that tree.

/// Arena indexing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexingMode {
    /// Every access is bounds-checked against capacity and failures are
    /// reported as [`LayoutError::IndexOutOfRange`](crate::LayoutError).
    #[default]
    Checked,
    /// Capacity checks are skipped and the backing slice is indexed
    /// directly. An out-of-range access panics.
    Unchecked,
}

/// Construction-time settings for a tree.
///
/// # Example
///
/// ```
/// use boxtree::{IndexingMode, TreeConfig};
///
/// let config = TreeConfig::new(64)
///     .indexing(IndexingMode::Unchecked)
///     .epsilon(1e-4);
///
/// assert_eq!(config.capacity, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeConfig {
    /// Number of node slots allocated up front.
    pub capacity: usize,
    /// How arena indices are checked.
    pub indexing_mode: IndexingMode,
    /// Tolerance for float comparisons in the solver ("has this node
    /// reached its max size", "are these siblings the same width").
    pub epsilon: f32,
}

impl TreeConfig {
    pub const DEFAULT_CAPACITY: usize = 256;
    pub const DEFAULT_EPSILON: f32 = 1e-3;

    /// Checked indexing with the default epsilon.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            indexing_mode: IndexingMode::Checked,
            epsilon: Self::DEFAULT_EPSILON,
        }
    }

    /// Set the indexing mode.
    pub fn indexing(mut self, mode: IndexingMode) -> Self {
        self.indexing_mode = mode;
        self
    }

    /// Set the float comparison tolerance. Negative values are treated as
    /// their magnitude.
    pub fn epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon.abs();
        self
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
