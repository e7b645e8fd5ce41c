//! Core types for boxtree.
//!
//! Geometry (`Vec2`, `Rect`, `Edges`), the per-axis policy enums the solver
//! dispatches on, and the `Sides` bitflags used by the edge setters.

// =============================================================================
// Geometry
// =============================================================================

/// A 2D vector, used for positions, sizes and per-axis clamps.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const INFINITY: Self = Self::new(f32::INFINITY, f32::INFINITY);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component along an axis.
    #[inline]
    pub const fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// An axis-aligned rectangle.
///
/// After the solver runs, a node's `bounds` is its final rectangle in
/// absolute (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Position along an axis (`x` or `y`).
    #[inline]
    pub const fn pos(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Extent along an axis (`width` or `height`).
    #[inline]
    pub const fn size(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    #[inline]
    pub fn set_pos(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }

    #[inline]
    pub fn set_size(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.width = value,
            Axis::Y => self.height = value,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Insets on the four sides of a box (padding or margins).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const ZERO: Self = Self::all(0.0);

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Left/right set to `x`, top/bottom set to `y`.
    pub const fn symmetric(x: f32, y: f32) -> Self {
        Self::new(y, x, y, x)
    }

    /// Leading inset on an axis (left or top).
    #[inline]
    pub const fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }

    /// Trailing inset on an axis (right or bottom).
    #[inline]
    pub const fn end(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.right,
            Axis::Y => self.bottom,
        }
    }

    /// Sum of both insets on an axis.
    #[inline]
    pub const fn sum(&self, axis: Axis) -> f32 {
        self.start(axis) + self.end(axis)
    }

    /// Overwrite every side selected by `sides`.
    pub fn set_sides(&mut self, sides: Sides, value: f32) {
        if sides.contains(Sides::TOP) {
            self.top = value;
        }
        if sides.contains(Sides::RIGHT) {
            self.right = value;
        }
        if sides.contains(Sides::BOTTOM) {
            self.bottom = value;
        }
        if sides.contains(Sides::LEFT) {
            self.left = value;
        }
    }
}

// =============================================================================
// Sides (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Selects which sides an edge setter writes.
    ///
    /// Combine with bitwise OR: `Sides::TOP | Sides::LEFT`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Sides: u8 {
        const TOP = 1 << 0;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEFT = 1 << 3;
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
        const ALL = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

// =============================================================================
// Axis
// =============================================================================

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Axis {
    /// Horizontal (widths, x positions).
    #[default]
    X = 0,
    /// Vertical (heights, y positions).
    Y = 1,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    pub const fn cross(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// A value per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisPair<T> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> AxisPair<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Same value on both axes.
    pub const fn splat(value: T) -> Self {
        Self { x: value, y: value }
    }

    #[inline]
    pub const fn get(&self, axis: Axis) -> T {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    #[inline]
    pub fn set(&mut self, axis: Axis, value: T) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }
}

// =============================================================================
// Policies
// =============================================================================

/// How a node sizes itself on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum SizePolicy {
    /// Size derived from the node's children plus padding.
    #[default]
    Fit = 0,
    /// Size set explicitly through `bounds`; the solver never changes it.
    Fixed = 1,
    /// Fits first, then expands to fill the parent's unused space.
    Grow = 2,
    /// Fits first, then gives up space when siblings overflow the parent.
    Shrink = 3,
}

/// Decode a policy from its `repr(u8)` value; unknown bytes are returned.
impl TryFrom<u8> for SizePolicy {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0 => Ok(Self::Fit),
            1 => Ok(Self::Fixed),
            2 => Ok(Self::Grow),
            3 => Ok(Self::Shrink),
            other => Err(other),
        }
    }
}

/// How a parent places its children on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Alignment {
    #[default]
    Begin = 0,
    Center = 1,
    End = 2,
    /// Reserved. The solver rejects trees that select it.
    Radial = 3,
}

impl TryFrom<u8> for Alignment {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0 => Ok(Self::Begin),
            1 => Ok(Self::Center),
            2 => Ok(Self::End),
            3 => Ok(Self::Radial),
            other => Err(other),
        }
    }
}

/// Per-axis size policies of a node.
pub type SizeFlags = AxisPair<SizePolicy>;

/// Per-axis child alignment of a node.
pub type ChildAlignment = AxisPair<Alignment>;
