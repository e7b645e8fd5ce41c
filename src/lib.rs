//! # boxtree
//!
//! Retained-mode box layout for immediate-style UI code.
//!
//! ## Architecture
//!
//! boxtree keeps every node in one fixed-capacity arena. Nodes are NOT heap
//! objects linked by pointers; they are slots addressed by [`NodeId`], and a
//! frame is built by appending slots in construction order:
//!
//! ```text
//! begin_root()/begin()/end()/end_root() → update_layout(w, h) → draw()
//! ```
//!
//! The solver is six ordered passes over that arena (fit, grow/shrink, text
//! wrap, fit, grow/shrink, position) and only ever writes node bounds. Each
//! frame rebuilds the tree into the same storage, so nothing is allocated
//! after construction.
//!
//! ## Example
//!
//! ```
//! use boxtree::{Alignment, AxisPair, LayoutTree, NodeId, SizePolicy, TreeConfig};
//!
//! let mut tree = LayoutTree::new(TreeConfig::default());
//! tree.begin_root()
//!     .set_child_alignment(AxisPair::splat(Alignment::Center))
//!     .begin()
//!         .set_size_policy(SizePolicy::Fixed)
//!         .set_dimensions(50.0, 20.0)
//!         .set_draw_func(|rect| println!("button at {rect:?}"))
//!     .end()
//!     .end_root()
//!     .unwrap();
//!
//! tree.update_layout(200.0, 100.0).unwrap();
//! let button = tree.bounds(NodeId::new(1)).unwrap();
//! assert_eq!((button.x, button.y), (75.0, 40.0));
//!
//! tree.draw().unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Geometry and per-axis policy enums
//! - [`engine`] - Node arena and the `begin()/end()` tree builder
//! - [`layout`] - The six-pass solver
//! - [`renderer`] - Draw dispatch to per-node callbacks

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod renderer;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{IndexingMode, TreeConfig};
pub use error::LayoutError;

pub use engine::{
    Children, ChildrenRev, Control, DrawFn, Layout, LayoutTree, Node, NodeArena, NodeData,
    NodeId, PreOrder, WrapFn,
};
