//! Geometry value types used by the layout and drawing protocols.

use std::ops::{Add, Sub};

/// A width and height with no location.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Size {
    /// Width in columns.
    pub w: u32,
    /// Height in rows.
    pub h: u32,
}

impl Size {
    /// Construct a size.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// A zero-valued size.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The number of cells covered by this size, saturating at `u32::MAX`.
    pub fn area(&self) -> u32 {
        self.w.saturating_mul(self.h)
    }

    /// True if this size can enclose `other` in both dimensions.
    pub fn contains(&self, other: Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }

    /// Shrink each dimension to fit within `bound`.
    pub fn clamp_to(&self, bound: Self) -> Self {
        Self {
            w: self.w.min(bound.w),
            h: self.h.min(bound.h),
        }
    }

    /// A rect of this size located at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(Position::zero(), *self)
    }
}

impl From<(u32, u32)> for Size {
    fn from(v: (u32, u32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

/// A cell coordinate.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Position {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl Position {
    /// Construct a position.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub fn zero() -> Self {
        Self::default()
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }
}

impl From<(u32, u32)> for Position {
    #[inline]
    fn from(v: (u32, u32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

/// A located rectangle. Layer frames are expressed in parent-local coordinates.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Position,
    /// Extent.
    pub size: Size,
}

impl Rect {
    /// Construct a rect from a corner and a size.
    pub fn new(tl: Position, size: Size) -> Self {
        Self { tl, size }
    }

    /// Does this rect contain the position? The right and bottom edges are exclusive.
    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.tl.x
            && p.y >= self.tl.y
            && p.x - self.tl.x < self.size.w
            && p.y - self.tl.y < self.size.h
    }

    /// True if the rect covers no cells.
    pub fn is_empty(&self) -> bool {
        self.size.w == 0 || self.size.h == 0
    }
}

/// A direction for focus navigation, relative to a child position.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Direction {
    /// The next element downward.
    Below,
    /// The next element upward.
    Above,
    /// The next element to the right.
    RightOf,
    /// The next element to the left.
    LeftOf,
}

impl Direction {
    /// All directions, in a stable order.
    pub const ALL: [Self; 4] = [Self::Below, Self::Above, Self::RightOf, Self::LeftOf];

    /// Is this a vertical direction?
    pub fn is_vertical(&self) -> bool {
        matches!(self, Self::Below | Self::Above)
    }

    /// Does this direction move towards higher coordinates?
    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Below | Self::RightOf)
    }
}
