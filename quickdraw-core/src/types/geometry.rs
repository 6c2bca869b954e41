//! Integer geometry used for panel windows and buffer rectangles.
//!
//! Panel coordinates are signed (consumers pass `-1` to mean "use the stored
//! position") while sizes are unsigned pixel counts.

use serde::{Deserialize, Serialize};

/// An integer point with `i32` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointInt {
    pub x: i32,
    pub y: i32,
}

impl PointInt {
    /// Creates a new `PointInt`.
    pub const fn new(x: i32, y: i32) -> Self {
        PointInt { x, y }
    }

    /// Returns `true` if either coordinate is negative.
    pub fn is_unset(&self) -> bool {
        self.x < 0 || self.y < 0
    }
}

/// An integer size with `u32` dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SizeInt {
    pub width: u32,
    pub height: u32,
}

impl SizeInt {
    /// Creates a new `SizeInt`.
    pub const fn new(width: u32, height: u32) -> Self {
        SizeInt { width, height }
    }

    /// Checks if the area is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An integer rectangle with `i32` origin and `u32` size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RectInt {
    /// The origin point (top-left corner) of the rectangle.
    pub origin: PointInt,
    /// The size (width and height) of the rectangle.
    pub size: SizeInt,
}

impl RectInt {
    /// Creates a new `RectInt` from an origin point and a size.
    pub const fn new(origin: PointInt, size: SizeInt) -> Self {
        RectInt { origin, size }
    }

    /// Creates a new `RectInt` from individual coordinate and dimension values.
    pub const fn from_coords(x: i32, y: i32, width: u32, height: u32) -> Self {
        RectInt {
            origin: PointInt::new(x, y),
            size: SizeInt::new(width, height),
        }
    }

    pub fn x(&self) -> i32 {
        self.origin.x
    }

    pub fn y(&self) -> i32 {
        self.origin.y
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Right edge, computed in `i64` so huge sizes cannot wrap.
    pub fn right(&self) -> i64 {
        self.origin.x as i64 + self.size.width as i64
    }

    /// Bottom edge, computed in `i64` so huge sizes cannot wrap.
    pub fn bottom(&self) -> i64 {
        self.origin.y as i64 + self.size.height as i64
    }

    /// Returns the same rectangle moved to `origin`.
    pub fn with_origin(&self, origin: PointInt) -> Self {
        RectInt { origin, size: self.size }
    }

    /// Checks that the rectangle lies entirely within a `bounds`-sized screen
    /// anchored at (0, 0). Touching the right/bottom edge is allowed.
    pub fn fits_within(&self, bounds: SizeInt) -> bool {
        !self.origin.is_unset()
            && self.right() <= bounds.width as i64
            && self.bottom() <= bounds.height as i64
    }

    /// Checks if the rectangle has zero width or height.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }
}
