//! Layout Engine - Node arena and tree builder.
//!
//! The engine owns the core data structures:
//! - Arena: fixed-capacity slot storage, checked or unchecked indexing
//! - Node: layout data, control hooks and index links to relatives
//! - Tree: the `begin()/end()` builder plus traversal queries
//!
//! # Architecture
//!
//! Nodes are NOT heap objects linked by pointers. They are slots in one
//! contiguous arena and refer to each other by [`NodeId`]:
//!
//! ```text
//! Slot 0: root (parent=-, first=1, last=3)
//! Slot 1: box  (parent=0, right=3, first=2, last=2)
//! Slot 2: box  (parent=1)
//! Slot 3: box  (parent=0, left=1)
//! ```
//!
//! Slots are written in construction order, so a new frame reuses the same
//! storage without allocating.

mod arena;
mod node;
mod tree;

pub use arena::NodeArena;
pub use node::{Control, DrawFn, Layout, Node, NodeData, NodeId, WrapFn};
pub use tree::{Children, ChildrenRev, LayoutTree, PreOrder};
