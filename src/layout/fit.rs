//! Fit passes (1 and 4): intrinsic sizes, children before parents.
//!
//! Along a node's layout axis its size is the sum of its children's outer
//! sizes plus the gaps between them; across it, the largest outer size.
//! Padding is added on top and the result is clamped to `[min, max]`.

use crate::engine::NodeId;
use crate::types::{Axis, SizePolicy};

use super::solver::Solver;

impl Solver<'_> {
    pub(super) fn fit(&mut self, axis: Axis) {
        let order = self.order;
        for &id in order.iter().rev() {
            let size = self.fitted_size(id, axis);
            self.set_size(id, axis, size);
        }
    }

    fn fitted_size(&self, id: NodeId, axis: Axis) -> f32 {
        let node = self.arena.node(id);
        let layout = &node.data.layout;
        let policy = layout.policy(axis);

        if id == NodeId::ROOT {
            match policy {
                SizePolicy::Fixed => return self.viewport.get(axis),
                SizePolicy::Grow => return layout.clamp(axis, self.viewport.get(axis)),
                SizePolicy::Fit | SizePolicy::Shrink => {}
            }
        } else if policy == SizePolicy::Fixed {
            return layout.bounds.size(axis);
        }

        let content = if node.is_leaf() {
            // pass 3 already measured wrapped text
            if axis == Axis::Y && node.data.control.has_wrap() {
                layout.bounds.size(axis) - layout.padding.sum(axis)
            } else {
                0.0
            }
        } else {
            self.children_extent(id, axis)
        };

        self.clamp(id, axis, content + layout.padding.sum(axis))
    }

    /// Room the children of `id` take on `axis`, margins and gaps included.
    pub(super) fn children_extent(&self, id: NodeId, axis: Axis) -> f32 {
        let node = self.arena.node(id);
        let along = node.data.layout.child_layout_axis == axis;

        let mut total = 0.0_f32;
        let mut count = 0_usize;
        let mut child = node.first_child;
        while let Some(c) = child {
            let n = self.arena.node(c);
            let outer = n.data.layout.outer_size(axis);
            total = if along { total + outer } else { total.max(outer) };
            count += 1;
            child = n.right_sibling;
        }

        if along && count > 1 {
            total += node.data.layout.child_spacing * (count - 1) as f32;
        }
        total
    }
}
