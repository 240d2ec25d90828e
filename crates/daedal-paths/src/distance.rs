use daedal_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible for 4-connected movement with unit edge cost.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
///
/// Admissible for 8-connected movement where diagonal steps cost 1.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}
