//! Position pass (6): place children inside their parent's content box.
//!
//! Along the layout axis children are stacked with `child_spacing` between
//! them; `Begin`, `Center` and `End` move the whole stack. Unused space only
//! exists for `Fixed` and `Grow` parents, since a fitted parent is exactly
//! as large as its stack. Across the layout axis each child is aligned on
//! its own.

use crate::engine::NodeId;
use crate::types::{Alignment, Axis, SizePolicy};

use super::solver::Solver;

impl Solver<'_> {
    pub(super) fn position(&mut self) {
        let order = self.order;
        for &id in order {
            if self.arena.node(id).is_leaf() {
                continue;
            }
            let main = self.arena.node(id).data.layout.child_layout_axis;
            self.place_along(id, main);
            self.place_across(id, main.cross());
        }
    }

    fn place_along(&mut self, id: NodeId, axis: Axis) {
        let layout = &self.arena.node(id).data.layout;
        let origin = layout.content_origin(axis);
        let spacing = layout.child_spacing;
        let alignment = layout.child_alignment.get(axis);
        let total = self.children_extent(id, axis);

        let unused = match layout.policy(axis) {
            SizePolicy::Fixed | SizePolicy::Grow => (layout.content_size(axis) - total).max(0.0),
            SizePolicy::Fit | SizePolicy::Shrink => 0.0,
        };

        match alignment {
            Alignment::Begin => self.stack_forward(id, axis, origin, spacing),
            Alignment::Center => self.stack_forward(id, axis, origin + unused / 2.0, spacing),
            Alignment::End => self.stack_backward(id, axis, origin + total + unused, spacing),
            Alignment::Radial => unreachable!("radial alignment is rejected before solving"),
        }
    }

    fn stack_forward(&mut self, id: NodeId, axis: Axis, mut cursor: f32, spacing: f32) {
        let mut child = self.arena.node(id).first_child;
        while let Some(c) = child {
            let node = self.arena.node_mut(c);
            let layout = &mut node.data.layout;
            layout.bounds.set_pos(axis, cursor + layout.margins.start(axis));
            cursor += layout.outer_size(axis) + spacing;
            child = node.right_sibling;
        }
    }

    /// `cursor` starts at the trailing edge of the stack.
    fn stack_backward(&mut self, id: NodeId, axis: Axis, mut cursor: f32, spacing: f32) {
        let mut child = self.arena.node(id).last_child;
        while let Some(c) = child {
            let node = self.arena.node_mut(c);
            let layout = &mut node.data.layout;
            cursor -= layout.outer_size(axis);
            layout.bounds.set_pos(axis, cursor + layout.margins.start(axis));
            cursor -= spacing;
            child = node.left_sibling;
        }
    }

    fn place_across(&mut self, id: NodeId, axis: Axis) {
        let layout = &self.arena.node(id).data.layout;
        let origin = layout.content_origin(axis);
        let extent = layout.content_size(axis);
        let alignment = layout.child_alignment.get(axis);

        let mut child = self.arena.node(id).first_child;
        while let Some(c) = child {
            let node = self.arena.node_mut(c);
            let layout = &mut node.data.layout;
            let free = (extent - layout.outer_size(axis)).max(0.0);
            let offset = match alignment {
                Alignment::Begin => 0.0,
                Alignment::Center => free / 2.0,
                Alignment::End => free,
                Alignment::Radial => unreachable!("radial alignment is rejected before solving"),
            };
            layout
                .bounds
                .set_pos(axis, origin + offset + layout.margins.start(axis));
            child = node.right_sibling;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TreeConfig;
    use crate::engine::{LayoutTree, NodeId};
    use crate::layout::assert_close;
    use crate::types::{Alignment, Axis, AxisPair, Rect, SizePolicy};

    fn bounds(tree: &LayoutTree, index: usize) -> Rect {
        tree.bounds(NodeId::new(index)).unwrap()
    }

    fn fixed(tree: &mut LayoutTree, w: f32, h: f32) {
        tree.begin()
            .set_size_policy(SizePolicy::Fixed)
            .set_dimensions(w, h)
            .end();
    }

    #[test]
    fn test_center_center() {
        let mut tree = LayoutTree::new(TreeConfig::new(4));
        tree.begin_root()
            .set_child_alignment(AxisPair::splat(Alignment::Center));
        fixed(&mut tree, 50.0, 20.0);
        tree.end_root().unwrap();

        tree.update_layout(200.0, 100.0).unwrap();
        let child = bounds(&tree, 1);
        assert_close(child.x, 75.0);
        assert_close(child.y, 40.0);
    }

    #[test]
    fn test_begin_stacks_with_spacing_and_margins() {
        let mut tree = LayoutTree::new(TreeConfig::new(8));
        tree.begin_root().set_child_spacing(4.0).set_padding_all(2.0);
        tree.begin()
            .set_size_policy(SizePolicy::Fixed)
            .set_dimensions(10.0, 10.0)
            .set_margins_x(3.0)
            .end();
        fixed(&mut tree, 20.0, 10.0);
        tree.end_root().unwrap();

        tree.update_layout(100.0, 50.0).unwrap();
        assert_close(bounds(&tree, 1).x, 5.0);
        assert_close(bounds(&tree, 1).y, 2.0);
        // 2 + 3 + 10 + 3 + 4
        assert_close(bounds(&tree, 2).x, 22.0);
    }

    #[test]
    fn test_end_walks_back_from_trailing_edge() {
        let mut tree = LayoutTree::new(TreeConfig::new(8));
        tree.begin_root()
            .set_child_spacing(5.0)
            .set_padding_x(10.0)
            .set_child_alignment(AxisPair::splat(Alignment::End));
        fixed(&mut tree, 20.0, 10.0);
        fixed(&mut tree, 30.0, 20.0);
        tree.end_root().unwrap();

        tree.update_layout(100.0, 50.0).unwrap();
        assert_close(bounds(&tree, 2).x, 60.0);
        assert_close(bounds(&tree, 1).x, 35.0);
        assert_close(bounds(&tree, 1).y, 40.0);
        assert_close(bounds(&tree, 2).y, 30.0);
    }

    #[test]
    #[rustfmt::skip]
    fn test_fit_parent_has_no_unused_space() {
        let mut tree = LayoutTree::new(TreeConfig::new(8));
        tree.begin_root()
            .begin()
                .set_child_alignment_x(Alignment::End)
                .set_min_size(0.0, 0.0)
                .begin()
                    .set_size_policy(SizePolicy::Fixed)
                    .set_dimensions(10.0, 10.0)
                .end()
            .end()
            .end_root()
            .unwrap();

        tree.update_layout(100.0, 100.0).unwrap();
        assert_close(bounds(&tree, 1).x, 0.0);
        assert_close(bounds(&tree, 2).x, 0.0);
    }

    #[test]
    fn test_vertical_stack_scenario() {
        let mut tree = LayoutTree::new(TreeConfig::new(4));
        tree.begin_root()
            .set_size_policy_y(SizePolicy::Fit)
            .set_child_layout_axis(Axis::Y)
            .set_child_spacing(5.0);
        fixed(&mut tree, 10.0, 30.0);
        fixed(&mut tree, 10.0, 70.0);
        tree.end_root().unwrap();

        tree.update_layout(100.0, 400.0).unwrap();
        assert_close(bounds(&tree, 0).height, 105.0);
        assert_close(bounds(&tree, 1).y, 0.0);
        assert_close(bounds(&tree, 2).y, 35.0);
    }

    #[test]
    fn test_nested_positions_are_absolute() {
        let mut tree = LayoutTree::new(TreeConfig::new(8));
        tree.begin_root().set_padding_all(10.0);
        tree.begin().set_padding_all(5.0);
        fixed(&mut tree, 10.0, 10.0);
        tree.end().end_root().unwrap();

        tree.update_layout(100.0, 100.0).unwrap();
        assert_eq!(bounds(&tree, 1), Rect::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(bounds(&tree, 2), Rect::new(15.0, 15.0, 10.0, 10.0));
    }

    #[test]
    fn test_cross_alignment_per_child() {
        let mut tree = LayoutTree::new(TreeConfig::new(8));
        tree.begin_root().set_child_alignment_y(Alignment::Center);
        fixed(&mut tree, 10.0, 10.0);
        fixed(&mut tree, 10.0, 40.0);
        tree.end_root().unwrap();

        tree.update_layout(100.0, 60.0).unwrap();
        assert_close(bounds(&tree, 1).y, 25.0);
        assert_close(bounds(&tree, 2).y, 10.0);
    }
}
