//! Horizontal-plane geometry.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point (or offset) on the horizontal plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical (screen-space) coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_then_add_rebases_a_point() {
        let position = Point::new(150.0, 40.0);
        let from = Point::new(100.0, 0.0);
        let to = Point::new(-20.0, 300.0);

        assert_eq!(position - from + to, Point::new(30.0, 340.0));
    }
}
