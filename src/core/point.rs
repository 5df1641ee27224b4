//! Grid Points and Distance
//!
//! Integer cell coordinates and the grid distance used for NPC and link
//! ordering.

use std::fmt;
use serde::{Serialize, Deserialize};

use super::direction::Direction;

/// Grid distance between two cells.
///
/// Chebyshev metric: `max(|dx|, |dy|)`.
#[inline]
pub fn distance(x1: i32, y1: i32, x2: i32, y2: i32) -> u32 {
    let dx = x1.abs_diff(x2);
    let dy = y1.abs_diff(y2);
    dx.max(dy)
}

/// A cell coordinate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// Column
    pub x: i32,
    /// Row (grows downwards)
    pub y: i32,
}

impl Point {
    /// Origin cell
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell in `direction`.
    #[inline]
    pub const fn step(self, direction: Direction) -> Self {
        let (x, y) = direction.apply(self.x, self.y);
        Self { x, y }
    }

    /// Grid distance to another point.
    #[inline]
    pub fn distance_to(self, other: Self) -> u32 {
        distance(self.x, self.y, other.x, other.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
