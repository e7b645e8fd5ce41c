//! Node - one slot of the arena.
//!
//! A node owns its [`NodeData`] and refers to its relatives by [`NodeId`]
//! only. The arena is the sole owner of node storage; parent, child and
//! sibling links never keep anything alive.

use std::fmt;
use std::rc::Rc;

use crate::types::{
    Axis, AxisPair, ChildAlignment, Edges, Rect, SizeFlags, SizePolicy, Vec2,
};

// =============================================================================
// NodeId
// =============================================================================

/// Typed index of a node in its arena.
///
/// Ids are stable for one build cycle. After the next `begin_root()` the same
/// id may name a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root always lives in slot 0.
    pub const ROOT: Self = Self(0);

    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Sizing and box-model data of a node.
///
/// Everything except `bounds` is input to the solver. `bounds` is both: for
/// `Fixed` axes the width/height set here are kept, every other field of it
/// is overwritten by `update_layout()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Resolved rectangle (meaningless until the solver runs).
    pub bounds: Rect,
    /// Inset applied to this node's own content when placing children.
    pub padding: Edges,
    /// Space kept around this node inside its parent.
    pub margins: Edges,
    /// Lower clamp per axis.
    pub min_size: Vec2,
    /// Upper clamp per axis.
    pub max_size: Vec2,
    /// Gap between consecutive children along `child_layout_axis`.
    pub child_spacing: f32,
    pub size_flags: SizeFlags,
    pub child_alignment: ChildAlignment,
    /// Axis along which children are laid out in sequence.
    pub child_layout_axis: Axis,
}

impl Layout {
    #[inline]
    pub fn policy(&self, axis: Axis) -> SizePolicy {
        self.size_flags.get(axis)
    }

    /// Clamp `value` into `[min_size, max_size]` on `axis`. The minimum wins
    /// when the two cross.
    #[inline]
    pub fn clamp(&self, axis: Axis, value: f32) -> f32 {
        value.min(self.max_size.get(axis)).max(self.min_size.get(axis))
    }

    /// Size plus margins on `axis`: the room this node takes in its parent.
    #[inline]
    pub fn outer_size(&self, axis: Axis) -> f32 {
        self.bounds.size(axis) + self.margins.sum(axis)
    }

    /// Size minus padding on `axis`, never negative.
    #[inline]
    pub fn content_size(&self, axis: Axis) -> f32 {
        (self.bounds.size(axis) - self.padding.sum(axis)).max(0.0)
    }

    /// Where children start on `axis`.
    #[inline]
    pub fn content_origin(&self, axis: Axis) -> f32 {
        self.bounds.pos(axis) + self.padding.start(axis)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            bounds: Rect::default(),
            padding: Edges::ZERO,
            margins: Edges::ZERO,
            min_size: Vec2::ZERO,
            max_size: Vec2::INFINITY,
            child_spacing: 0.0,
            size_flags: AxisPair::splat(SizePolicy::Fit),
            child_alignment: ChildAlignment::default(),
            child_layout_axis: Axis::X,
        }
    }
}

// =============================================================================
// Control
// =============================================================================

/// Draw callback: receives the node's resolved rectangle.
pub type DrawFn = Rc<dyn Fn(Rect)>;

/// Wrap callback: receives the content width, returns the content height.
pub type WrapFn = Rc<dyn Fn(f32) -> f32>;

/// Behaviour attached to a node.
///
/// Neither hook can reach the tree, so neither can influence anything but
/// what the solver asks of it.
#[derive(Clone, Default)]
pub struct Control {
    draw: Option<DrawFn>,
    wrap: Option<WrapFn>,
}

impl Control {
    /// A control that draws nothing.
    pub fn passthrough() -> Self {
        Self::default()
    }

    pub fn new(draw: impl Fn(Rect) + 'static) -> Self {
        Self {
            draw: Some(Rc::new(draw)),
            wrap: None,
        }
    }

    pub fn set_draw(&mut self, draw: DrawFn) {
        self.draw = Some(draw);
    }

    pub fn set_wrap(&mut self, wrap: WrapFn) {
        self.wrap = Some(wrap);
    }

    /// Run the draw callback (no-op for passthrough controls).
    #[inline]
    pub fn draw(&self, bounds: Rect) {
        if let Some(draw) = &self.draw {
            draw(bounds);
        }
    }

    pub fn is_passthrough(&self) -> bool {
        self.draw.is_none()
    }

    pub fn wrap_fn(&self) -> Option<&WrapFn> {
        self.wrap.as_ref()
    }

    pub fn has_wrap(&self) -> bool {
        self.wrap.is_some()
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("draw", &self.draw.as_ref().map(|_| "Fn(Rect)"))
            .field("wrap", &self.wrap.as_ref().map(|_| "Fn(f32) -> f32"))
            .finish()
    }
}

// =============================================================================
// NodeData / Node
// =============================================================================

/// Everything a node carries besides its links.
#[derive(Debug, Clone, Default)]
pub struct NodeData {
    pub layout: Layout,
    pub control: Control,
}

/// One arena slot: data plus index links to its relatives.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub left_sibling: Option<NodeId>,
    pub right_sibling: Option<NodeId>,
}

impl Node {
    /// A node with no children and no siblings yet.
    pub fn new(data: NodeData, parent: Option<NodeId>) -> Self {
        Self {
            data,
            parent,
            first_child: None,
            last_child: None,
            left_sibling: None,
            right_sibling: None,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.data.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::ROOT.to_string(), "#0");
        assert_eq!(NodeId::new(42).index(), 42);
    }

    #[test]
    fn test_layout_defaults() {
        let layout = Layout::default();
        assert_eq!(layout.min_size, Vec2::ZERO);
        assert_eq!(layout.max_size, Vec2::INFINITY);
        assert_eq!(layout.size_flags, AxisPair::splat(SizePolicy::Fit));
        assert_eq!(layout.child_layout_axis, Axis::X);
        assert_eq!(layout.child_spacing, 0.0);
    }

    #[test]
    fn test_layout_clamp() {
        let layout = Layout {
            min_size: Vec2::new(10.0, 0.0),
            max_size: Vec2::new(50.0, 5.0),
            ..Layout::default()
        };
        assert_eq!(layout.clamp(Axis::X, 3.0), 10.0);
        assert_eq!(layout.clamp(Axis::X, 30.0), 30.0);
        assert_eq!(layout.clamp(Axis::X, 80.0), 50.0);
        assert_eq!(layout.clamp(Axis::Y, 8.0), 5.0);

        // min wins when min > max
        let crossed = Layout {
            min_size: Vec2::new(20.0, 0.0),
            max_size: Vec2::new(10.0, 0.0),
            ..Layout::default()
        };
        assert_eq!(crossed.clamp(Axis::X, 15.0), 20.0);
    }

    #[test]
    fn test_layout_content_box() {
        let layout = Layout {
            bounds: Rect::new(10.0, 20.0, 100.0, 8.0),
            padding: Edges::new(1.0, 2.0, 3.0, 4.0),
            margins: Edges::all(5.0),
            ..Layout::default()
        };
        assert_eq!(layout.content_origin(Axis::X), 14.0);
        assert_eq!(layout.content_origin(Axis::Y), 21.0);
        assert_eq!(layout.content_size(Axis::X), 94.0);
        assert_eq!(layout.content_size(Axis::Y), 4.0);
        assert_eq!(layout.outer_size(Axis::X), 110.0);
    }

    #[test]
    fn test_control_passthrough() {
        let control = Control::passthrough();
        assert!(control.is_passthrough());
        assert!(!control.has_wrap());
        control.draw(Rect::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_control_draw_receives_bounds() {
        let seen = Rc::new(Cell::new(Rect::default()));
        let seen_clone = seen.clone();
        let control = Control::new(move |rect| seen_clone.set(rect));

        control.draw(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(seen.get(), Rect::new(1.0, 2.0, 3.0, 4.0));
        assert!(!control.is_passthrough());
    }

    #[test]
    fn test_new_node_has_no_links() {
        let node = Node::new(NodeData::default(), Some(NodeId::ROOT));
        assert_eq!(node.parent, Some(NodeId::ROOT));
        assert!(node.is_leaf());
        assert!(node.last_child.is_none());
        assert!(node.left_sibling.is_none());
        assert!(node.right_sibling.is_none());
    }
}
