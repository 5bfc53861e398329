//! Minimum bounding rectangle

use super::Vector2;
use std::fmt;

/// Axis-aligned minimum bounding rectangle.
///
/// Always stored normalized: `min.x <= max.x` and `min.y <= max.y`, whatever
/// order the corners were read from the file in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mbr {
    /// Minimum point (lower-left corner)
    min: Vector2,
    /// Maximum point (upper-right corner)
    max: Vector2,
}

impl Mbr {
    /// Build from two opposite corners given in any order
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let mut mbr = Mbr::default();
        mbr.set(x1, y1, x2, y2);
        mbr
    }

    /// Build from two corner points given in any order
    pub fn from_corners(a: Vector2, b: Vector2) -> Self {
        Mbr::new(a.x, a.y, b.x, b.y)
    }

    /// Degenerate MBR around a single point
    pub fn from_point(point: Vector2) -> Self {
        Mbr {
            min: point,
            max: point,
        }
    }

    /// Smallest MBR containing all the points
    pub fn from_points(points: &[Vector2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut mbr = Mbr::from_point(*first);
        for p in rest {
            mbr.expand_to_include(*p);
        }
        Some(mbr)
    }

    /// Replace the corners, normalizing so that min <= max on both axes
    pub fn set(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.min = Vector2::new(x1.min(x2), y1.min(y2));
        self.max = Vector2::new(x1.max(x2), y1.max(y2));
    }

    pub fn min(&self) -> Vector2 {
        self.min
    }

    pub fn max(&self) -> Vector2 {
        self.max
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// True when the two rectangles share at least one point
    pub fn intersects(&self, other: &Mbr) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    pub fn expand_to_include(&mut self, point: Vector2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }
}

impl fmt::Display for Mbr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MBR[{} -> {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalizes_swapped_corners() {
        let mbr = Mbr::new(10.0, 5.0, -2.0, -1.0);
        assert_eq!(mbr.min(), Vector2::new(-2.0, -1.0));
        assert_eq!(mbr.max(), Vector2::new(10.0, 5.0));
        assert_eq!(mbr.width(), 12.0);
        assert_eq!(mbr.height(), 6.0);
    }

    #[test]
    fn test_from_points() {
        let points = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 5.0),
            Vector2::new(-5.0, 3.0),
        ];
        let mbr = Mbr::from_points(&points).unwrap();
        assert_eq!(mbr.min(), Vector2::new(-5.0, 0.0));
        assert_eq!(mbr.max(), Vector2::new(10.0, 5.0));
        assert!(Mbr::from_points(&[]).is_none());
    }

    #[test]
    fn test_intersects() {
        let a = Mbr::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Mbr::new(5.0, 5.0, 15.0, 15.0)));
        assert!(a.intersects(&Mbr::new(10.0, 10.0, 11.0, 11.0)));
        assert!(!a.intersects(&Mbr::new(11.0, 0.0, 12.0, 1.0)));
    }

    proptest! {
        #[test]
        fn prop_set_always_normalized(
            x1 in -1e9f64..1e9, y1 in -1e9f64..1e9,
            x2 in -1e9f64..1e9, y2 in -1e9f64..1e9,
        ) {
            let mbr = Mbr::new(x1, y1, x2, y2);
            prop_assert!(mbr.min().x <= mbr.max().x);
            prop_assert!(mbr.min().y <= mbr.max().y);
            prop_assert_eq!(mbr, Mbr::new(x2, y2, x1, y1));
        }
    }
}
