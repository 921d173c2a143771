//! Bounding box calculation.
//!
//! Computes the axis-aligned box of a cage polygon, either as a plain
//! min/max box or with the single-pass incremental update that grows the box
//! from the first vertex.

use crate::basics::{iceil, ifloor, PointD, RectI};

/// Axis-aligned box stored as origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if (x, y) lies inside the box, edges included.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    /// Integer pixel rectangle covering the box.
    ///
    /// `x1`/`y1` are inclusive, `x2`/`y2` exclusive:
    /// `[floor(x), ceil(x + width))` by `[floor(y), ceil(y + height))`.
    /// Returns `None` if a corner is not finite or falls outside the `i32`
    /// pixel grid.
    pub fn pixel_bounds(&self) -> Option<RectI> {
        let x1 = ifloor(self.x)?;
        let y1 = ifloor(self.y)?;
        let x2 = iceil(self.x + self.width)?.max(x1);
        let y2 = iceil(self.y + self.height)?.max(y1);
        Some(RectI::new(x1, y1, x2, y2))
    }
}

/// How the cage bounding box is recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundingBoxMode {
    /// Conventional min/max box. Always covers every vertex.
    #[default]
    MinMax,
    /// Single pass growing a 1x1 box seeded at the first vertex. Moving the
    /// origin down does not widen the box, so the result may miss vertices
    /// that were reached before the origin moved.
    Incremental,
}

/// Compute the box of `points` with the given mode.
/// Returns `None` if there are no points.
pub fn bounding_box<I>(points: I, mode: BoundingBoxMode) -> Option<BoundingBox>
where
    I: IntoIterator<Item = PointD>,
{
    match mode {
        BoundingBoxMode::MinMax => bounding_box_min_max(points),
        BoundingBoxMode::Incremental => bounding_box_incremental(points),
    }
}

/// Min/max bounding box of `points`. Returns `None` if there are no points.
pub fn bounding_box_min_max<I>(points: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = PointD>,
{
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let mut x1 = first.x;
    let mut y1 = first.y;
    let mut x2 = first.x;
    let mut y2 = first.y;

    for p in iter {
        if p.x < x1 {
            x1 = p.x;
        }
        if p.y < y1 {
            y1 = p.y;
        }
        if p.x > x2 {
            x2 = p.x;
        }
        if p.y > y2 {
            y2 = p.y;
        }
    }

    Some(BoundingBox::new(x1, y1, x2 - x1, y2 - y1))
}

/// Single-pass incremental box of `points`. Returns `None` if there are no
/// points.
///
/// Starts at the first vertex with width = height = 1. Each later vertex
/// lowers the origin if it lies before it, then extends the width/height to
/// `v - origin` if it lies past the far edge measured from the current origin.
pub fn bounding_box_incremental<I>(points: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = PointD>,
{
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let mut bb = BoundingBox::new(first.x, first.y, 1.0, 1.0);

    for p in iter {
        if p.x < bb.x {
            bb.x = p.x;
        }
        if p.y < bb.y {
            bb.y = p.y;
        }
        if p.x > bb.x + bb.width {
            bb.width = p.x - bb.x;
        }
        if p.y > bb.y + bb.height {
            bb.height = p.y - bb.y;
        }
    }

    Some(bb)
}
