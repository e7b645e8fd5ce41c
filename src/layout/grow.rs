//! Grow/shrink passes (2 and 5): hand out free space, parents before
//! children.
//!
//! Along the layout axis, leftover space goes to `Grow` children and
//! overflow is taken from `Shrink` children, both max-min fair: the smallest
//! growers (largest shrinkers) move first, until they tie with the next
//! size level or the space runs out. Across the layout axis each child is
//! sized on its own against the parent's content extent: `Grow` children
//! expand to it, `Shrink` children are reduced to it.

use crate::engine::NodeId;
use crate::types::{Axis, SizePolicy};

use super::solver::Solver;

impl Solver<'_> {
    pub(super) fn distribute(&mut self, axis: Axis) {
        let order = self.order;
        for &id in order {
            let node = self.arena.node(id);
            if node.is_leaf() {
                continue;
            }
            if node.data.layout.child_layout_axis == axis {
                self.distribute_along(id, axis);
            } else {
                self.distribute_across(id, axis);
            }
        }
    }

    fn distribute_along(&mut self, id: NodeId, axis: Axis) {
        let content = self.arena.node(id).data.layout.content_size(axis);
        let remaining = content - self.children_extent(id, axis);

        if remaining > self.epsilon {
            self.collect_candidates(id, axis, SizePolicy::Grow);
            self.grow_candidates(axis, remaining);
        } else if remaining < -self.epsilon {
            self.collect_candidates(id, axis, SizePolicy::Shrink);
            self.shrink_candidates(axis, -remaining);
        }
    }

    fn distribute_across(&mut self, id: NodeId, axis: Axis) {
        let content = self.arena.node(id).data.layout.content_size(axis);

        let mut child = self.arena.node(id).first_child;
        while let Some(c) = child {
            let layout = &self.arena.node(c).data.layout;
            let available = content - layout.margins.sum(axis);
            let size = layout.bounds.size(axis);

            let resized = match layout.policy(axis) {
                // grow never shrinks below the fitted size
                SizePolicy::Grow => Some(layout.clamp(axis, available.max(size))),
                SizePolicy::Shrink if size > available => Some(layout.clamp(axis, available)),
                _ => None,
            };

            child = self.arena.node(c).right_sibling;
            if let Some(size) = resized {
                self.set_size(c, axis, size);
            }
        }
    }

    /// Children of `id` with `policy` on `axis` that still have room to move.
    fn collect_candidates(&mut self, id: NodeId, axis: Axis, policy: SizePolicy) {
        self.candidates.clear();

        let mut child = self.arena.node(id).first_child;
        while let Some(c) = child {
            let node = self.arena.node(c);
            let layout = &node.data.layout;
            if layout.policy(axis) == policy {
                let size = layout.bounds.size(axis);
                let open = match policy {
                    SizePolicy::Grow => size < layout.max_size.get(axis) - self.epsilon,
                    _ => size > layout.min_size.get(axis) + self.epsilon,
                };
                if open {
                    self.candidates.push(c);
                }
            }
            child = node.right_sibling;
        }
    }

    fn grow_candidates(&mut self, axis: Axis, mut remaining: f32) {
        let eps = self.epsilon;
        // every round saturates a child, merges two size levels, or ends
        let mut rounds = 2 * self.candidates.len() + 1;

        while remaining > eps && !self.candidates.is_empty() && rounds > 0 {
            rounds -= 1;

            let mut smallest = f32::INFINITY;
            for &c in self.candidates.iter() {
                smallest = smallest.min(self.size(c, axis));
            }
            let mut second = f32::INFINITY;
            let mut tied = 0_usize;
            for &c in self.candidates.iter() {
                let size = self.size(c, axis);
                if size - smallest <= eps {
                    tied += 1;
                } else {
                    second = second.min(size);
                }
            }

            let share = remaining / tied as f32;
            let step = (second - smallest).min(share);
            let target = smallest + step;

            let mut given = 0.0;
            let mut unplaced = 0.0;
            for i in 0..self.candidates.len() {
                let c = self.candidates[i];
                let size = self.size(c, axis);
                if size - smallest > eps {
                    continue;
                }
                let max = self.arena.node(c).data.layout.max_size.get(axis);
                let grown = target.min(max);
                given += grown - size;
                unplaced += target - grown;
                self.set_size(c, axis, grown);
            }

            remaining = if step >= share { unplaced } else { remaining - given };

            let arena = &*self.arena;
            self.candidates.retain(|&c| {
                let layout = &arena.node(c).data.layout;
                layout.bounds.size(axis) < layout.max_size.get(axis) - eps
            });
        }
    }

    fn shrink_candidates(&mut self, axis: Axis, mut overflow: f32) {
        let eps = self.epsilon;
        let mut rounds = 2 * self.candidates.len() + 1;

        while overflow > eps && !self.candidates.is_empty() && rounds > 0 {
            rounds -= 1;

            let mut largest = f32::NEG_INFINITY;
            for &c in self.candidates.iter() {
                largest = largest.max(self.size(c, axis));
            }
            let mut second = f32::NEG_INFINITY;
            let mut tied = 0_usize;
            for &c in self.candidates.iter() {
                let size = self.size(c, axis);
                if largest - size <= eps {
                    tied += 1;
                } else {
                    second = second.max(size);
                }
            }

            let share = overflow / tied as f32;
            let step = (largest - second).min(share);
            let target = largest - step;

            let mut taken = 0.0;
            let mut untaken = 0.0;
            for i in 0..self.candidates.len() {
                let c = self.candidates[i];
                let size = self.size(c, axis);
                if largest - size > eps {
                    continue;
                }
                let min = self.arena.node(c).data.layout.min_size.get(axis);
                let shrunk = target.max(min);
                taken += size - shrunk;
                untaken += shrunk - target;
                self.set_size(c, axis, shrunk);
            }

            overflow = if step >= share { untaken } else { overflow - taken };

            let arena = &*self.arena;
            self.candidates.retain(|&c| {
                let layout = &arena.node(c).data.layout;
                layout.bounds.size(axis) > layout.min_size.get(axis) + eps
            });
        }
    }
}
