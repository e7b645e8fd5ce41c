//! Layout Module - the six-pass box solver.
//!
//! # Architecture
//!
//! The solver works on an already-built [`LayoutTree`](crate::LayoutTree)
//! and only ever writes node `bounds`:
//!
//! 1. Fit widths to children, bottom-up
//! 2. Grow/shrink widths into free space, top-down
//! 3. Measure wrapped text at the final widths
//! 4. Fit heights
//! 5. Grow/shrink heights
//! 6. Position children and apply alignment
//!
//! Widths are fully resolved before any height is computed, so a wrap hook
//! always sees the width its node will be drawn at.
//!
//! # Example
//!
//! ```
//! use boxtree::{LayoutTree, NodeId, SizePolicy, TreeConfig};
//!
//! let mut tree = LayoutTree::new(TreeConfig::new(4));
//! tree.begin_root()
//!     .begin().set_size_policy_x(SizePolicy::Grow).end()
//!     .begin().set_size_policy_x(SizePolicy::Grow).end()
//!     .end_root()
//!     .unwrap();
//!
//! tree.update_layout(80.0, 24.0).unwrap();
//! assert_eq!(tree.bounds(NodeId::new(2)).unwrap().x, 40.0);
//! ```

mod fit;
mod grow;
mod position;
mod solver;
mod text_wrap;

#[cfg(test)]
pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= 1e-3,
        "expected {expected}, got {actual}"
    );
}
