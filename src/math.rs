//! Geometric math utilities.
//!
//! Triangle orientation and polygon containment used by the cage model.

use crate::basics::PointD;

// ============================================================================
// Orientation
// ============================================================================

/// Twice the signed area of triangle (p0, p1, p2), written as
/// `x0(y1 - y2) + x1(y2 - y0) + x2(y0 - y1)`.
///
/// Positive for triangles that turn clockwise on screen (y axis down).
#[inline]
pub fn triangle_orientation(p0: PointD, p1: PointD, p2: PointD) -> f64 {
    p0.x * (p1.y - p2.y) + p1.x * (p2.y - p0.y) + p2.x * (p0.y - p1.y)
}

// ============================================================================
// Containment
// ============================================================================

/// Even-odd crossing test of (x, y) against the closed polygon `points`.
///
/// Polygons with fewer than three points contain nothing.
pub fn point_in_polygon<I>(points: I, x: f64, y: f64) -> bool
where
    I: IntoIterator<Item = PointD>,
    I::IntoIter: Clone,
{
    let iter = points.into_iter();
    let last = match iter.clone().last() {
        Some(p) => p,
        None => return false,
    };
    if iter.clone().count() < 3 {
        return false;
    }

    let mut inside = false;
    let mut prev = last;
    for cur in iter {
        if (cur.y > y) != (prev.y > y)
            && x < (prev.x - cur.x) * (y - cur.y) / (prev.y - cur.y) + cur.x
        {
            inside = !inside;
        }
        prev = cur;
    }
    inside
}

// ============================================================================
// Tests
// ============================================================================
