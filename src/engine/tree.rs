//! Tree Builder - `begin_root()/begin()/end()/end_root()` construction.
//!
//! The builder is an implicit stack: `begin()` appends the next arena slot as
//! the last child of the current parent and makes it the new current parent,
//! `end()` walks back up through the parent link. No recursion, so nesting
//! depth is bounded only by capacity, and construction order equals arena
//! order (pre-order).
//!
//! # Example
//!
//! ```
//! use boxtree::{Axis, LayoutTree, SizePolicy, TreeConfig};
//!
//! let mut tree = LayoutTree::new(TreeConfig::new(8));
//! tree.begin_root()
//!     .set_child_layout_axis(Axis::Y)
//!     .set_child_spacing(4.0)
//!     .begin()
//!         .set_size_policy(SizePolicy::Fixed)
//!         .set_dimensions(40.0, 10.0)
//!     .end()
//!     .begin()
//!         .set_size_policy_x(SizePolicy::Grow)
//!         .set_min_size(0.0, 12.0)
//!     .end()
//!     .end_root()
//!     .unwrap();
//!
//! assert_eq!(tree.arena_size(), 3);
//! ```

use log::{debug, warn};

use crate::config::TreeConfig;
use crate::error::LayoutError;
use crate::types::{
    Alignment, Axis, AxisPair, ChildAlignment, Edges, Rect, Sides, SizeFlags, SizePolicy, Vec2,
};

use super::arena::NodeArena;
use super::node::{DrawFn, Node, NodeData, NodeId, WrapFn};

use std::rc::Rc;

/// A fixed-capacity box tree with its builder state.
///
/// Build with the fluent `begin_root()` ... `end_root()` protocol, solve with
/// `update_layout()`, then `draw()`.
#[derive(Debug)]
pub struct LayoutTree {
    pub(crate) arena: NodeArena,
    pub(crate) config: TreeConfig,
    /// Template every new slot starts from.
    default_data: NodeData,

    /// Next slot to write.
    cursor: usize,
    /// Slots written by the last completed build.
    pub(crate) arena_size: usize,
    current_parent: Option<NodeId>,
    pub(crate) building: bool,
    /// Open `begin()`s, excluding the root.
    depth: usize,
    /// Innermost open `begin()`s that did not get a slot.
    overflow_depth: usize,
    build_error: Option<LayoutError>,

    /// Solver scratch: breadth-first node order.
    pub(crate) order: Vec<NodeId>,
    /// Solver scratch: siblings still able to grow or shrink.
    pub(crate) candidates: Vec<NodeId>,
}

impl LayoutTree {
    /// Create a tree; every slot is allocated here.
    pub fn new(config: TreeConfig) -> Self {
        Self::with_default_data(config, NodeData::default())
    }

    /// Create a tree whose `begin()` slots start from `default_data`.
    pub fn with_default_data(config: TreeConfig, default_data: NodeData) -> Self {
        Self {
            arena: NodeArena::new(config.capacity, config.indexing_mode),
            config,
            default_data,
            cursor: 0,
            arena_size: 0,
            current_parent: None,
            building: false,
            depth: 0,
            overflow_depth: 0,
            build_error: None,
            order: Vec::with_capacity(config.capacity),
            candidates: Vec::with_capacity(config.capacity),
        }
    }

    // =========================================================================
    // Build protocol
    // =========================================================================

    /// Start a new build cycle with slot 0 as the root.
    ///
    /// The root starts from the default data with both size policies forced
    /// to `Fixed`, so it takes the viewport unless told otherwise.
    ///
    /// # Panics
    ///
    /// If a build is already in progress.
    pub fn begin_root(&mut self) -> &mut Self {
        assert!(
            !self.building,
            "begin_root() called while a tree is already being built"
        );

        self.building = true;
        self.cursor = 0;
        self.depth = 0;
        self.overflow_depth = 0;
        self.build_error = None;
        self.current_parent = None;

        let mut data = self.default_data.clone();
        data.layout.size_flags = AxisPair::splat(SizePolicy::Fixed);

        match self.arena.reset_slot(NodeId::ROOT, data, None) {
            Ok(()) => {
                self.current_parent = Some(NodeId::ROOT);
                self.cursor = 1;
            }
            Err(err) => self.record_overflow(err),
        }

        self
    }

    /// Finish the build cycle.
    ///
    /// Records the arena size and rewinds the cursor. Returns the first
    /// capacity error hit while building, if any; the nodes that did fit are
    /// kept either way.
    ///
    /// # Panics
    ///
    /// Without a preceding `begin_root()`, or with `begin()`s still open.
    pub fn end_root(&mut self) -> Result<&mut Self, LayoutError> {
        assert!(self.building, "end_root() called without begin_root()");
        assert!(
            self.depth == 0,
            "end_root() called with {} unmatched begin()",
            self.depth
        );

        self.arena_size = self.cursor;
        self.cursor = 0;
        self.current_parent = None;
        self.building = false;
        debug!("built tree with {} nodes", self.arena_size);

        match self.build_error.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    /// Open a child of the current node and make it current.
    ///
    /// In checked mode, running out of capacity is remembered and reported
    /// by `end_root()`; the overflowed subtree is skipped (setters become
    /// no-ops) but its `end()` calls must still be made.
    ///
    /// # Panics
    ///
    /// Outside `begin_root()`/`end_root()`. In unchecked mode, on overflow.
    pub fn begin(&mut self) -> &mut Self {
        assert!(self.building, "begin() called outside begin_root()/end_root()");
        self.depth += 1;

        if self.overflow_depth > 0 {
            self.overflow_depth += 1;
            return self;
        }

        match self.open_child() {
            Ok(_) => {}
            Err(err) => {
                self.record_overflow(err);
            }
        }
        self
    }

    /// Like [`begin`](Self::begin), but reports a capacity error right away.
    ///
    /// On error no node is opened and no `end()` must follow.
    pub fn try_begin(&mut self) -> Result<&mut Self, LayoutError> {
        assert!(
            self.building,
            "try_begin() called outside begin_root()/end_root()"
        );

        if self.overflow_depth > 0 {
            return Err(self.build_error.unwrap_or(LayoutError::IndexOutOfRange {
                index: self.cursor,
                capacity: self.arena.capacity(),
            }));
        }

        self.open_child()?;
        self.depth += 1;
        Ok(self)
    }

    /// Close the current node; its parent becomes current.
    ///
    /// # Panics
    ///
    /// With no open `begin()`.
    pub fn end(&mut self) -> &mut Self {
        assert!(
            self.building && self.depth > 0,
            "end() called with no open begin()"
        );
        self.depth -= 1;

        if self.overflow_depth > 0 {
            self.overflow_depth -= 1;
            return self;
        }

        self.current_parent = self
            .current_parent
            .and_then(|id| self.arena.node(id).parent);
        self
    }

    fn open_child(&mut self) -> Result<NodeId, LayoutError> {
        let Some(parent) = self.current_parent else {
            return Err(LayoutError::IndexOutOfRange {
                index: self.cursor,
                capacity: self.arena.capacity(),
            });
        };

        let id = NodeId::new(self.cursor);
        self.arena
            .reset_slot(id, self.default_data.clone(), Some(parent))?;

        let previous_last = self.arena.node(parent).last_child;
        {
            let parent_node = self.arena.node_mut(parent);
            if parent_node.first_child.is_none() {
                parent_node.first_child = Some(id);
            }
            parent_node.last_child = Some(id);
        }
        if let Some(previous) = previous_last {
            self.arena.node_mut(previous).right_sibling = Some(id);
        }
        self.arena.node_mut(id).left_sibling = previous_last;

        self.current_parent = Some(id);
        self.cursor += 1;
        Ok(id)
    }

    fn record_overflow(&mut self, err: LayoutError) {
        if self.build_error.is_none() {
            warn!("tree build overflowed: {err}");
            self.build_error = Some(err);
        }
        self.overflow_depth += 1;
    }

    // =========================================================================
    // Fluent setters (apply to the current node)
    // =========================================================================

    fn edit(&mut self, apply: impl FnOnce(&mut NodeData)) -> &mut Self {
        assert!(
            self.building,
            "node setters are only valid between begin_root() and end_root()"
        );
        if self.overflow_depth == 0 {
            if let Some(id) = self.current_parent {
                apply(&mut self.arena.node_mut(id).data);
            }
        }
        self
    }

    /// Replace the current node's data wholesale.
    pub fn set_data(&mut self, data: NodeData) -> &mut Self {
        self.edit(|d| *d = data)
    }

    pub fn set_bounds(&mut self, bounds: Rect) -> &mut Self {
        self.edit(|d| d.layout.bounds = bounds)
    }

    pub fn set_position(&mut self, x: f32, y: f32) -> &mut Self {
        self.edit(|d| {
            d.layout.bounds.x = x;
            d.layout.bounds.y = y;
        })
    }

    /// Set width and height. Only kept by the solver on `Fixed` axes.
    pub fn set_dimensions(&mut self, width: f32, height: f32) -> &mut Self {
        self.edit(|d| {
            d.layout.bounds.width = width;
            d.layout.bounds.height = height;
        })
    }

    pub fn set_min_size(&mut self, width: f32, height: f32) -> &mut Self {
        self.edit(|d| d.layout.min_size = Vec2::new(width, height))
    }

    pub fn set_max_size(&mut self, width: f32, height: f32) -> &mut Self {
        self.edit(|d| d.layout.max_size = Vec2::new(width, height))
    }

    pub fn set_padding(&mut self, padding: Edges) -> &mut Self {
        self.edit(|d| d.layout.padding = padding)
    }

    pub fn set_padding_sides(&mut self, sides: Sides, value: f32) -> &mut Self {
        self.edit(|d| d.layout.padding.set_sides(sides, value))
    }

    pub fn set_padding_all(&mut self, value: f32) -> &mut Self {
        self.set_padding_sides(Sides::ALL, value)
    }

    /// Left and right padding.
    pub fn set_padding_x(&mut self, value: f32) -> &mut Self {
        self.set_padding_sides(Sides::HORIZONTAL, value)
    }

    /// Top and bottom padding.
    pub fn set_padding_y(&mut self, value: f32) -> &mut Self {
        self.set_padding_sides(Sides::VERTICAL, value)
    }

    pub fn set_margins(&mut self, margins: Edges) -> &mut Self {
        self.edit(|d| d.layout.margins = margins)
    }

    pub fn set_margins_sides(&mut self, sides: Sides, value: f32) -> &mut Self {
        self.edit(|d| d.layout.margins.set_sides(sides, value))
    }

    pub fn set_margins_all(&mut self, value: f32) -> &mut Self {
        self.set_margins_sides(Sides::ALL, value)
    }

    pub fn set_margins_x(&mut self, value: f32) -> &mut Self {
        self.set_margins_sides(Sides::HORIZONTAL, value)
    }

    pub fn set_margins_y(&mut self, value: f32) -> &mut Self {
        self.set_margins_sides(Sides::VERTICAL, value)
    }

    pub fn set_child_spacing(&mut self, spacing: f32) -> &mut Self {
        self.edit(|d| d.layout.child_spacing = spacing)
    }

    pub fn set_size_flags(&mut self, flags: SizeFlags) -> &mut Self {
        self.edit(|d| d.layout.size_flags = flags)
    }

    /// Same policy on both axes.
    pub fn set_size_policy(&mut self, policy: SizePolicy) -> &mut Self {
        self.set_size_flags(AxisPair::splat(policy))
    }

    pub fn set_size_policy_x(&mut self, policy: SizePolicy) -> &mut Self {
        self.edit(|d| d.layout.size_flags.x = policy)
    }

    pub fn set_size_policy_y(&mut self, policy: SizePolicy) -> &mut Self {
        self.edit(|d| d.layout.size_flags.y = policy)
    }

    pub fn set_child_alignment(&mut self, alignment: ChildAlignment) -> &mut Self {
        self.edit(|d| d.layout.child_alignment = alignment)
    }

    pub fn set_child_alignment_x(&mut self, alignment: Alignment) -> &mut Self {
        self.edit(|d| d.layout.child_alignment.x = alignment)
    }

    pub fn set_child_alignment_y(&mut self, alignment: Alignment) -> &mut Self {
        self.edit(|d| d.layout.child_alignment.y = alignment)
    }

    pub fn set_child_layout_axis(&mut self, axis: Axis) -> &mut Self {
        self.edit(|d| d.layout.child_layout_axis = axis)
    }

    /// Install the draw callback of the current node.
    pub fn set_draw_func(&mut self, draw: impl Fn(Rect) + 'static) -> &mut Self {
        let draw: DrawFn = Rc::new(draw);
        self.edit(|d| d.control.set_draw(draw))
    }

    /// Install the text-wrap hook: content width in, content height out.
    pub fn set_wrap_func(&mut self, wrap: impl Fn(f32) -> f32 + 'static) -> &mut Self {
        let wrap: WrapFn = Rc::new(wrap);
        self.edit(|d| d.control.set_wrap(wrap))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Nodes written by the last completed build.
    pub fn arena_size(&self) -> usize {
        self.arena_size
    }

    pub fn is_building(&self) -> bool {
        self.building
    }

    /// Root of the last completed build.
    pub fn root(&self) -> Option<NodeId> {
        (self.arena_size > 0).then_some(NodeId::ROOT)
    }

    /// The node setters currently write to (while building).
    pub fn current(&self) -> Option<NodeId> {
        if self.overflow_depth > 0 {
            None
        } else {
            self.current_parent
        }
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, LayoutError> {
        self.arena.get(id)
    }

    pub fn bounds(&self, id: NodeId) -> Result<Rect, LayoutError> {
        self.arena.get(id).map(|node| node.data.layout.bounds)
    }

    /// Children from first to last.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            arena: &self.arena,
            next: self.arena.get(id).ok().and_then(|n| n.first_child),
        }
    }

    /// Children from last to first.
    pub fn children_rev(&self, id: NodeId) -> ChildrenRev<'_> {
        ChildrenRev {
            arena: &self.arena,
            next: self.arena.get(id).ok().and_then(|n| n.last_child),
        }
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Parent before children, children left to right.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            arena: &self.arena,
            next: self.root(),
        }
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}

// =============================================================================
// Traversal
// =============================================================================

/// Iterator over a node's children, left to right.
pub struct Children<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.node(current).right_sibling;
        Some(current)
    }
}

/// Iterator over a node's children, right to left.
pub struct ChildrenRev<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
}

impl Iterator for ChildrenRev<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.node(current).left_sibling;
        Some(current)
    }
}

/// Link-walking pre-order traversal from the root.
pub struct PreOrder<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        let node = self.arena.node(current);

        self.next = node.first_child.or_else(|| {
            // climb until some ancestor (or the node itself) has a right sibling
            let mut up = Some(current);
            while let Some(id) = up {
                let n = self.arena.node(id);
                if n.right_sibling.is_some() {
                    return n.right_sibling;
                }
                up = n.parent;
            }
            None
        });

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexingMode;

    fn tree(capacity: usize) -> LayoutTree {
        LayoutTree::new(TreeConfig::new(capacity))
    }

    /// root
    /// ├── 1
    /// │   ├── 2
    /// │   └── 3
    /// └── 4
    #[rustfmt::skip]
    fn sample(tree: &mut LayoutTree) {
        tree.begin_root()
            .begin()
                .begin().end()
                .begin().end()
            .end()
            .begin().end()
            .end_root()
            .unwrap();
    }

    fn id(i: usize) -> NodeId {
        NodeId::new(i)
    }

    #[test]
    fn test_links_after_build() {
        let mut tree = tree(8);
        sample(&mut tree);

        assert_eq!(tree.arena_size(), 5);
        assert_eq!(tree.root(), Some(NodeId::ROOT));

        let root = tree.node(NodeId::ROOT).unwrap();
        assert_eq!(root.parent, None);
        assert_eq!(root.first_child, Some(id(1)));
        assert_eq!(root.last_child, Some(id(4)));

        let one = tree.node(id(1)).unwrap();
        assert_eq!(one.parent, Some(NodeId::ROOT));
        assert_eq!(one.first_child, Some(id(2)));
        assert_eq!(one.last_child, Some(id(3)));
        assert_eq!(one.right_sibling, Some(id(4)));
        assert_eq!(one.left_sibling, None);

        let three = tree.node(id(3)).unwrap();
        assert_eq!(three.left_sibling, Some(id(2)));
        assert_eq!(three.right_sibling, None);
        assert!(three.is_leaf());

        let four = tree.node(id(4)).unwrap();
        assert_eq!(four.left_sibling, Some(id(1)));
        assert_eq!(four.parent, Some(NodeId::ROOT));
    }

    #[test]
    fn test_children_iterators() {
        let mut tree = tree(8);
        sample(&mut tree);

        let forward: Vec<_> = tree.children(NodeId::ROOT).collect();
        let mut backward: Vec<_> = tree.children_rev(NodeId::ROOT).collect();
        backward.reverse();

        assert_eq!(forward, vec![id(1), id(4)]);
        assert_eq!(forward, backward);
        assert_eq!(tree.child_count(id(1)), 2);
        assert_eq!(tree.child_count(id(4)), 0);
    }

    #[test]
    fn test_pre_order_matches_construction_order() {
        let mut tree = tree(8);
        sample(&mut tree);

        let order: Vec<usize> = tree.pre_order().map(NodeId::index).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_root_forced_fixed() {
        let mut tree = tree(4);
        tree.begin_root();
        assert_eq!(
            tree.node(NodeId::ROOT).unwrap().data.layout.size_flags,
            AxisPair::splat(SizePolicy::Fixed)
        );
        tree.begin();
        assert_eq!(
            tree.node(id(1)).unwrap().data.layout.size_flags,
            AxisPair::splat(SizePolicy::Fit)
        );
        tree.end().end_root().unwrap();
    }

    #[test]
    fn test_default_data_template() {
        let mut template = NodeData::default();
        template.layout.child_spacing = 3.0;
        template.layout.padding = Edges::all(2.0);

        let mut tree = LayoutTree::with_default_data(TreeConfig::new(4), template);
        tree.begin_root().begin().end().end_root().unwrap();

        let child = tree.node(id(1)).unwrap();
        assert_eq!(child.data.layout.child_spacing, 3.0);
        assert_eq!(child.data.layout.padding, Edges::all(2.0));
    }

    #[test]
    #[rustfmt::skip]
    fn test_setters_apply_to_current_node() {
        let mut tree = tree(4);
        tree.begin_root()
            .set_child_spacing(5.0)
            .begin()
                .set_bounds(Rect::new(1.0, 2.0, 3.0, 4.0))
                .set_padding_x(6.0)
                .set_margins_y(7.0)
                .set_size_policy_y(SizePolicy::Grow)
                .set_child_alignment_x(Alignment::End)
                .set_child_layout_axis(Axis::Y)
                .set_min_size(1.0, 1.0)
                .set_max_size(9.0, 9.0)
            .end()
            .end_root()
            .unwrap();

        assert_eq!(tree.node(NodeId::ROOT).unwrap().data.layout.child_spacing, 5.0);

        let layout = tree.node(id(1)).unwrap().data.layout;
        assert_eq!(layout.bounds, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(layout.padding, Edges::new(0.0, 6.0, 0.0, 6.0));
        assert_eq!(layout.margins, Edges::new(7.0, 0.0, 7.0, 0.0));
        assert_eq!(layout.size_flags, AxisPair::new(SizePolicy::Fit, SizePolicy::Grow));
        assert_eq!(layout.child_alignment.x, Alignment::End);
        assert_eq!(layout.child_layout_axis, Axis::Y);
        assert_eq!(layout.min_size, Vec2::new(1.0, 1.0));
        assert_eq!(layout.max_size, Vec2::new(9.0, 9.0));
    }

    #[test]
    fn test_rebuild_reuses_slots() {
        let mut tree = tree(8);
        sample(&mut tree);

        tree.begin_root().begin().end().end_root().unwrap();
        assert_eq!(tree.arena_size(), 2);

        let root = tree.node(NodeId::ROOT).unwrap();
        assert_eq!(root.first_child, Some(id(1)));
        assert_eq!(root.last_child, Some(id(1)));
        assert!(tree.node(id(1)).unwrap().is_leaf());
        assert_eq!(tree.pre_order().count(), 2);
    }

    #[test]
    #[rustfmt::skip]
    fn test_checked_overflow_is_reported_by_end_root() {
        let mut tree = tree(2);
        let result = tree
            .begin_root()
            .begin()
            .end()
            .begin()
                .set_child_spacing(3.0)
                .begin().end()
            .end()
            .end_root()
            .map(|t| t.arena_size());

        assert_eq!(
            result,
            Err(LayoutError::IndexOutOfRange {
                index: 2,
                capacity: 2
            })
        );
        assert_eq!(tree.arena_size(), 2);
        assert!(!tree.is_building());
        assert_eq!(tree.child_count(NodeId::ROOT), 1);
    }

    #[test]
    fn test_try_begin_reports_immediately() {
        let mut tree = tree(1);
        tree.begin_root();
        assert_eq!(
            tree.try_begin().err(),
            Some(LayoutError::IndexOutOfRange {
                index: 1,
                capacity: 1
            })
        );
        assert_eq!(tree.current(), Some(NodeId::ROOT));
        tree.end_root().unwrap();
    }

    #[test]
    fn test_zero_capacity_checked() {
        let mut tree = tree(0);
        let result = tree.begin_root().begin().end().end_root().map(|_| ());
        assert!(result.is_err());
        assert_eq!(tree.arena_size(), 0);
        assert_eq!(tree.root(), None);
    }

    #[test]
    #[should_panic]
    fn test_unchecked_overflow_panics() {
        let mut tree = LayoutTree::new(TreeConfig::new(1).indexing(IndexingMode::Unchecked));
        tree.begin_root().begin();
    }

    #[test]
    #[should_panic(expected = "end() called with no open begin()")]
    fn test_end_without_begin_panics() {
        let mut tree = tree(4);
        tree.begin_root().end();
    }

    #[test]
    #[should_panic(expected = "end_root() called without begin_root()")]
    fn test_end_root_without_begin_root_panics() {
        let mut tree = tree(4);
        let _ = tree.end_root();
    }

    #[test]
    #[should_panic(expected = "unmatched begin()")]
    fn test_end_root_with_open_begin_panics() {
        let mut tree = tree(4);
        let _ = tree.begin_root().begin().end_root();
    }

    #[test]
    #[should_panic(expected = "already being built")]
    fn test_nested_begin_root_panics() {
        let mut tree = tree(4);
        tree.begin_root().begin_root();
    }

    #[test]
    #[should_panic(expected = "outside begin_root()/end_root()")]
    fn test_begin_outside_build_panics() {
        let mut tree = tree(4);
        tree.begin();
    }
}
