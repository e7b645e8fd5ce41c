//! Text wrap pass (3).
//!
//! Runs between the width and height passes: a node carrying a wrap hook is
//! asked how tall its content gets at its final content width. Nodes without
//! a hook, and nodes with a `Fixed` height, are left alone.

use crate::types::{Axis, SizePolicy};

use super::solver::Solver;

impl Solver<'_> {
    pub(super) fn wrap_text(&mut self) {
        let order = self.order;
        for &id in order {
            let node = self.arena.node(id);
            let layout = &node.data.layout;
            if layout.policy(Axis::Y) == SizePolicy::Fixed {
                continue;
            }
            let Some(wrap) = node.data.control.wrap_fn() else {
                continue;
            };

            let content_height = wrap(layout.content_size(Axis::X)).max(0.0);
            let height = self.clamp(id, Axis::Y, content_height + layout.padding.sum(Axis::Y));
            self.set_size(id, Axis::Y, height);
        }
    }
}
