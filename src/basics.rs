//! Foundation types, constants, and rounding utilities.
//!
//! The 2D point/vector type and the corner rectangle that everything else
//! in the crate builds on.

use core::ops::{Add, Mul, Neg, Sub};

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Floor of `v` as an `i32`, or `None` if the result is not finite or does
/// not fit.
#[inline]
pub fn ifloor(v: f64) -> Option<i32> {
    to_i32(v.floor())
}

/// Ceiling of `v` as an `i32`, or `None` if the result is not finite or does
/// not fit.
#[inline]
pub fn iceil(v: f64) -> Option<i32> {
    to_i32(v.ceil())
}

#[inline]
fn to_i32(v: f64) -> Option<i32> {
    // NaN fails both comparisons.
    if v >= i32::MIN as f64 && v <= i32::MAX as f64 {
        Some(v as i32)
    } else {
        None
    }
}

// ============================================================================
// Mathematical constants
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

// ============================================================================
// Point
// ============================================================================

/// A 2D point, also used as a free vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

pub type PointD = PointBase<f64>;

impl PointD {
    pub const ZERO: PointD = PointD { x: 0.0, y: 0.0 };

    /// Dot product.
    #[inline]
    pub fn dot(self, other: PointD) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product `self.x * other.y - self.y * other.x`.
    #[inline]
    pub fn cross(self, other: PointD) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction. A zero vector stays zero.
    pub fn normalize(self) -> PointD {
        let len = self.length();
        if len != 0.0 {
            let inv = 1.0 / len;
            PointD::new(self.x * inv, self.y * inv)
        } else {
            PointD::ZERO
        }
    }

    /// Unit perpendicular `(-y, x)`.
    pub fn normal(self) -> PointD {
        PointD::new(-self.y, self.x).normalize()
    }
}

impl Add for PointD {
    type Output = PointD;

    #[inline]
    fn add(self, rhs: PointD) -> PointD {
        PointD::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for PointD {
    type Output = PointD;

    #[inline]
    fn sub(self, rhs: PointD) -> PointD {
        PointD::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for PointD {
    type Output = PointD;

    #[inline]
    fn mul(self, rhs: f64) -> PointD {
        PointD::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for PointD {
    type Output = PointD;

    #[inline]
    fn neg(self) -> PointD {
        PointD::new(-self.x, -self.y)
    }
}

// ============================================================================
// Rect
// ============================================================================

/// A rectangle defined by two corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Normalize so that x1 <= x2 and y1 <= y2, swapping if needed.
    pub fn normalize(&mut self) -> &Self {
        if self.x1 > self.x2 {
            core::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            core::mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }

    /// Returns `true` if the point (x, y) is inside the rectangle.
    pub fn hit_test(&self, x: T, y: T) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

impl Rect<f64> {
    /// Axis-aligned square of side `size` centered on `center`.
    pub fn centered_square(center: PointD, size: f64) -> Self {
        let half = size * 0.5;
        Self::new(
            center.x - half,
            center.y - half,
            center.x + half,
            center.y + half,
        )
    }
}

/// Rectangle with `i32` coordinates.
pub type RectI = Rect<i32>;
/// Rectangle with `f64` coordinates.
pub type RectD = Rect<f64>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ifloor() {
        assert_eq!(ifloor(1.7), Some(1));
        assert_eq!(ifloor(1.0), Some(1));
        assert_eq!(ifloor(-1.7), Some(-2));
        assert_eq!(ifloor(-1.0), Some(-1));
        assert_eq!(ifloor(0.0), Some(0));
        assert_eq!(ifloor(-2147483648.5), None);
        assert_eq!(ifloor(-3e9), None);
        assert_eq!(ifloor(f64::NAN), None);
    }

    #[test]
    fn test_iceil() {
        assert_eq!(iceil(1.1), Some(2));
        assert_eq!(iceil(1.0), Some(1));
        assert_eq!(iceil(-1.1), Some(-1));
        assert_eq!(iceil(2147483647.0), Some(i32::MAX));
        assert_eq!(iceil(2147483647.5), None);
        assert_eq!(iceil(f64::INFINITY), None);
    }

    #[test]
    fn test_point_arithmetic() {
        let a = PointD::new(3.0, 4.0);
        let b = PointD::new(1.0, -2.0);
        assert_eq!(a + b, PointD::new(4.0, 2.0));
        assert_eq!(a - b, PointD::new(2.0, 6.0));
        assert_eq!(a * 2.0, PointD::new(6.0, 8.0));
        assert_eq!(-a, PointD::new(-3.0, -4.0));
        assert!((a.length() - 5.0).abs() < 1e-12);
        assert!((a.dot(b) - (-5.0)).abs() < 1e-12);
        // 3 * -2 - 4 * 1
        assert!((a.cross(b) - (-10.0)).abs() < 1e-12);
    }

    #[test]
    fn test_normalize() {
        let n = PointD::new(0.0, 10.0).normalize();
        assert!((n.x).abs() < 1e-12);
        assert!((n.y - 1.0).abs() < 1e-12);
        assert_eq!(PointD::ZERO.normalize(), PointD::ZERO);
    }

    #[test]
    fn test_normal_swaps_and_negates() {
        let n = PointD::new(10.0, 0.0).normal();
        assert!((n.x).abs() < 1e-12);
        assert!((n.y - 1.0).abs() < 1e-12);

        let n = PointD::new(0.0, 4.0).normal();
        assert!((n.x + 1.0).abs() < 1e-12);
        assert!((n.y).abs() < 1e-12);
    }

    #[test]
    fn test_rect_normalize() {
        let mut r = Rect::new(30, 40, 10, 20);
        r.normalize();
        assert_eq!(r.x1, 10);
        assert_eq!(r.y1, 20);
        assert_eq!(r.x2, 30);
        assert_eq!(r.y2, 40);
    }

    #[test]
    fn test_rect_hit_test() {
        let r = Rect::new(10, 20, 30, 40);
        assert!(r.hit_test(15, 25));
        assert!(r.hit_test(10, 20)); // on corner
        assert!(!r.hit_test(5, 25));
        assert!(!r.hit_test(15, 45));
    }

    #[test]
    fn test_centered_square() {
        let r = RectD::centered_square(PointD::new(10.0, 20.0), 6.0);
        assert!((r.x1 - 7.0).abs() < 1e-12);
        assert!((r.y1 - 17.0).abs() < 1e-12);
        assert!((r.x2 - 13.0).abs() < 1e-12);
        assert!((r.y2 - 23.0).abs() < 1e-12);
        assert!(r.hit_test(10.0, 20.0));
        assert!(!r.hit_test(13.5, 20.0));
    }
}
