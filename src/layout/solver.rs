//! Solver entry point.
//!
//! # Algorithm
//!
//! 1. **Pass 1**: Fit widths (reverse BFS, children before parents)
//! 2. **Pass 2**: Grow/shrink widths (BFS, parents before children)
//! 3. **Pass 3**: Text wrap hooks, now that widths are final
//! 4. **Pass 4**: Fit heights
//! 5. **Pass 5**: Grow/shrink heights
//! 6. **Pass 6**: Positions and alignment
//!
//! The BFS order is collected once per solve into storage owned by the tree,
//! so a solve on a warm tree does not allocate.

use log::{debug, trace, warn};

use crate::engine::{LayoutTree, NodeArena, NodeId};
use crate::error::LayoutError;
use crate::types::{Alignment, Axis, Vec2};

/// Borrowed view of a tree for the duration of one solve.
pub(super) struct Solver<'a> {
    pub(super) arena: &'a mut NodeArena,
    /// Every node of the tree, parents before children.
    pub(super) order: &'a [NodeId],
    /// Reusable sibling list for grow/shrink distribution.
    pub(super) candidates: &'a mut Vec<NodeId>,
    pub(super) viewport: Vec2,
    pub(super) epsilon: f32,
}

impl LayoutTree {
    /// Resolve the bounds of every node against a `width` x `height`
    /// viewport.
    ///
    /// The root is anchored at the origin. On a `Fixed` axis it takes the
    /// viewport extent; other root policies are bounded by it.
    ///
    /// Nothing is modified when an error is returned.
    pub fn update_layout(&mut self, width: f32, height: f32) -> Result<(), LayoutError> {
        if self.building {
            return Err(LayoutError::BuildInProgress);
        }
        if self.arena_size == 0 {
            return Err(LayoutError::EmptyTree);
        }
        if let Err(err) = self.validate() {
            warn!("layout rejected: {err}");
            return Err(err);
        }

        let viewport = Vec2::new(width.max(0.0), height.max(0.0));
        debug!(
            "update_layout {}x{} over {} nodes",
            viewport.x, viewport.y, self.arena_size
        );

        self.collect_breadth_first();

        let mut solver = Solver {
            arena: &mut self.arena,
            order: &self.order,
            candidates: &mut self.candidates,
            viewport,
            epsilon: self.config.epsilon,
        };

        solver.anchor_root();

        trace!("pass 1: fit widths");
        solver.fit(Axis::X);
        trace!("pass 2: grow/shrink widths");
        solver.distribute(Axis::X);
        trace!("pass 3: text wrap");
        solver.wrap_text();
        trace!("pass 4: fit heights");
        solver.fit(Axis::Y);
        trace!("pass 5: grow/shrink heights");
        solver.distribute(Axis::Y);
        trace!("pass 6: positions");
        solver.position();

        Ok(())
    }

    /// Reject trees the solver cannot handle before touching any bounds.
    fn validate(&self) -> Result<(), LayoutError> {
        for index in 0..self.arena_size {
            let node = NodeId::new(index);
            let alignment = self.arena.node(node).data.layout.child_alignment;
            for axis in [Axis::X, Axis::Y] {
                if alignment.get(axis) == Alignment::Radial {
                    return Err(LayoutError::UnsupportedAlignment { node, axis });
                }
            }
        }
        Ok(())
    }

    fn collect_breadth_first(&mut self) {
        self.order.clear();
        self.order.push(NodeId::ROOT);

        let mut head = 0;
        while head < self.order.len() {
            let mut child = self.arena.node(self.order[head]).first_child;
            while let Some(id) = child {
                self.order.push(id);
                child = self.arena.node(id).right_sibling;
            }
            head += 1;
        }
    }
}

impl Solver<'_> {
    fn anchor_root(&mut self) {
        let root = &mut self.arena.node_mut(NodeId::ROOT).data.layout;
        root.bounds.x = 0.0;
        root.bounds.y = 0.0;
    }

    /// `[min, max]` clamp on `axis`, with the root additionally bounded by
    /// the viewport. Minimum wins.
    pub(super) fn clamp(&self, id: NodeId, axis: Axis, value: f32) -> f32 {
        let layout = &self.arena.node(id).data.layout;
        let mut max = layout.max_size.get(axis);
        if id == NodeId::ROOT {
            max = max.min(self.viewport.get(axis));
        }
        value.min(max).max(layout.min_size.get(axis))
    }

    #[inline]
    pub(super) fn size(&self, id: NodeId, axis: Axis) -> f32 {
        self.arena.node(id).data.layout.bounds.size(axis)
    }

    #[inline]
    pub(super) fn set_size(&mut self, id: NodeId, axis: Axis, value: f32) {
        self.arena
            .node_mut(id)
            .data
            .layout
            .bounds
            .set_size(axis, value);
    }
}
