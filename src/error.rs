//! Error types.
//!
//! Only recoverable conditions live here. Builder protocol violations
//! (`end()` without a matching `begin()`, and so on) are programming errors
//! and panic instead.

use crate::engine::NodeId;
use crate::types::Axis;

/// Errors reported by the arena, the builder and the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Arena access past capacity (checked indexing mode only).
    #[error("node index {index} is out of range for an arena of capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    /// No tree has been completed with `end_root()` yet.
    #[error("the tree is empty; build it with begin_root()/end_root() first")]
    EmptyTree,

    /// The solver was invoked between `begin_root()` and `end_root()`.
    #[error("the tree is still being built")]
    BuildInProgress,

    /// A node selected the reserved radial alignment.
    #[error("node {node} selects radial child alignment on the {axis:?} axis, which is not supported")]
    UnsupportedAlignment { node: NodeId, axis: Axis },
}
