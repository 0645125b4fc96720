//! Geometry primitives: [`Point`], [`GridPos`] and [`Range`].

use std::fmt;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point. X grows right, Y grows down (image coordinates).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// All eight neighbours, clockwise starting from north.
    #[inline]
    pub fn neighbors_8(self) -> [Point; 8] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x + 1, self.y - 1),
            Self::new(self.x + 1, self.y),
            Self::new(self.x + 1, self.y + 1),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y + 1),
            Self::new(self.x - 1, self.y),
            Self::new(self.x - 1, self.y - 1),
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// GridPos
// ---------------------------------------------------------------------------

/// A tile address in a row-major weight grid. Displays as `(row, col)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub row: i32,
    pub col: i32,
}

impl GridPos {
    /// Create a new grid position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The four cardinal neighbours in search order: previous row, next row,
    /// previous column, next column.
    #[inline]
    pub fn neighbors_4(self) -> [GridPos; 4] {
        [
            Self::new(self.row - 1, self.col),
            Self::new(self.row + 1, self.col),
            Self::new(self.row, self.col - 1),
            Self::new(self.row, self.col + 1),
        ]
    }

    /// The same tile as an image-style point (`x` = column, `y` = row).
    #[inline]
    pub const fn to_point(self) -> Point {
        Point::new(self.col, self.row)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Range anchored at the origin with the given size. Negative sizes
    /// clamp to zero.
    #[inline]
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            min: Point::new(0, 0),
            max: Point::new(width.max(0), height.max(0)),
        }
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `p` is inside the half-open range.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_display_matches_tuple_form() {
        assert_eq!(Point::new(11, 7).to_string(), "(11, 7)");
        assert_eq!(GridPos::new(2, 4).to_string(), "(2, 4)");
    }

    #[test]
    fn neighbors_8_are_distinct_and_adjacent() {
        let p = Point::new(5, 5);
        let ns = p.neighbors_8();
        for (i, n) in ns.iter().enumerate() {
            assert!((n.x - p.x).abs() <= 1 && (n.y - p.y).abs() <= 1);
            assert_ne!(*n, p);
            assert!(!ns[i + 1..].contains(n));
        }
        assert_eq!(ns[0], Point::new(5, 4));
    }

    #[test]
    fn grid_neighbors_order() {
        let ns = GridPos::new(1, 1).neighbors_4();
        assert_eq!(
            ns,
            [
                GridPos::new(0, 1),
                GridPos::new(2, 1),
                GridPos::new(1, 0),
                GridPos::new(1, 2)
            ]
        );
        assert_eq!(GridPos::new(3, 1).to_point(), Point::new(1, 3));
    }

    #[test]
    fn range_contains_is_half_open() {
        let r = Range::with_size(12, 8);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(11, 7)));
        assert!(!r.contains(Point::new(12, 7)));
        assert!(!r.contains(Point::new(11, 8)));
        assert!(!r.contains(Point::new(-1, 0)));
    }

    #[test]
    fn empty_range() {
        let r = Range::with_size(0, 4);
        assert!(r.is_empty());
        assert!(!r.contains(Point::new(0, 0)));
        assert!(!Range::with_size(1, 1).is_empty());
        assert_eq!(Range::with_size(-3, 2), Range::with_size(0, 2));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn gridpos_round_trip() {
        let p = GridPos::new(3, 7);
        let json = serde_json::to_string(&p).unwrap();
        let back: GridPos = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn range_round_trip() {
        let r = Range::with_size(10, 20);
        let json = serde_json::to_string(&r).unwrap();
        let back: Range = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
