//! Renderer - draw dispatch.
//!
//! The crate never draws anything itself. [`LayoutTree::draw`](crate::LayoutTree::draw)
//! hands every node's resolved rectangle to the draw callback installed with
//! `set_draw_func()`, and the host turns those calls into output (terminal
//! cells, GPU quads, ...).

mod dispatch;
