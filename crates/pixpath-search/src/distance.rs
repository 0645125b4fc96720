use pixpath_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
///
/// Admissible on 8-connected problems whose edges all cost at least 1.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(0, 0);
        let b = Point::new(11, 7);
        assert_eq!(manhattan(a, b), 18);
        assert_eq!(chebyshev(a, b), 11);
        assert_eq!(manhattan(b, a), manhattan(a, b));
        assert_eq!(chebyshev(a, a), 0);
    }
}
