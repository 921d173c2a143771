//! Cage model: the control polygon of a cage deformation.
//!
//! A cage is a closed polygon stored twice: the original outline drawn
//! around an image region, and a deformed copy the user drags around. Edge
//! `i` joins point `i` to point `(i + 1) % len`. Each point also carries the
//! ratio between the deformed and original length of the edge that starts
//! at it, and a selection flag for interactive editing.

use log::{debug, trace};

use crate::basics::{PointD, RectD};
use crate::bounding_rect::{bounding_box, BoundingBox, BoundingBoxMode};
use crate::error::{CageError, CageResult};
use crate::math::{point_in_polygon, triangle_orientation};

/// Which of the two polygons an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CageMode {
    /// The original outline, edited before deforming.
    #[default]
    Edit,
    /// The deformed outline.
    Deform,
}

/// One control point of the cage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CagePoint {
    /// Position on the original polygon.
    pub src: PointD,
    /// Position on the deformed polygon.
    pub dest: PointD,
    /// Deformed length over original length of the edge starting here.
    pub edge_scaling: f64,
    /// Part of the current selection.
    pub selected: bool,
}

impl CagePoint {
    fn new(x: f64, y: f64) -> Self {
        let p = PointD::new(x, y);
        Self {
            src: p,
            dest: p,
            edge_scaling: 1.0,
            selected: false,
        }
    }

    /// Position on the polygon selected by `mode`.
    #[inline]
    pub fn position(&self, mode: CageMode) -> PointD {
        match mode {
            CageMode::Edit => self.src,
            CageMode::Deform => self.dest,
        }
    }
}

/// The cage: paired original/deformed polygons plus derived data.
#[derive(Debug, Clone, Default)]
pub struct CageModel {
    points: Vec<CagePoint>,
    bounding_box: BoundingBox,
    bounding_box_mode: BoundingBoxMode,
    displacement: PointD,
    displacement_mode: CageMode,
}

impl CageModel {
    /// Create an empty cage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cage from a list of points, in order.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let mut cage = Self::new();
        cage.points.reserve(points.len());
        for &(x, y) in points {
            cage.points.push(CagePoint::new(x, y));
        }
        cage.recompute_scaling();
        cage
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[CagePoint] {
        &self.points
    }

    pub fn vertex(&self, index: usize) -> Option<PointD> {
        self.points.get(index).map(|p| p.src)
    }

    pub fn deformed_vertex(&self, index: usize) -> Option<PointD> {
        self.points.get(index).map(|p| p.dest)
    }

    pub fn edge_scaling(&self, index: usize) -> Option<f64> {
        self.points.get(index).map(|p| p.edge_scaling)
    }

    pub fn position(&self, mode: CageMode, index: usize) -> Option<PointD> {
        self.points.get(index).map(|p| p.position(mode))
    }

    /// Original polygon, in order.
    pub fn vertices(&self) -> impl Iterator<Item = PointD> + Clone + '_ {
        self.points.iter().map(|p| p.src)
    }

    /// Deformed polygon, in order.
    pub fn deformed_vertices(&self) -> impl Iterator<Item = PointD> + Clone + '_ {
        self.points.iter().map(|p| p.dest)
    }

    pub fn edge_scalings(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.edge_scaling)
    }

    /// Box around the original polygon as of the last
    /// [`normalize_winding_and_bounding_box`](Self::normalize_winding_and_bounding_box).
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    pub fn bounding_box_mode(&self) -> BoundingBoxMode {
        self.bounding_box_mode
    }

    pub fn set_bounding_box_mode(&mut self, mode: BoundingBoxMode) {
        self.bounding_box_mode = mode;
    }

    fn check_index(&self, index: usize) -> CageResult<()> {
        if index < self.points.len() {
            Ok(())
        } else {
            Err(CageError::IndexOutOfRange {
                index,
                count: self.points.len(),
            })
        }
    }

    // ---------------------------------------------------------------
    // Construction and editing
    // ---------------------------------------------------------------

    /// Append a point to both polygons and recompute edge scaling.
    pub fn add_point(&mut self, x: f64, y: f64) {
        trace!("cage: add point {} at ({x}, {y})", self.points.len());
        self.points.push(CagePoint::new(x, y));
        self.recompute_scaling();
    }

    /// Insert a point before `index` in both polygons. `index == len()`
    /// appends.
    pub fn insert_point(&mut self, index: usize, x: f64, y: f64) -> CageResult<()> {
        if index > self.points.len() {
            return Err(CageError::IndexOutOfRange {
                index,
                count: self.points.len(),
            });
        }
        trace!("cage: insert point {index} at ({x}, {y})");
        self.points.insert(index, CagePoint::new(x, y));
        self.recompute_scaling();
        Ok(())
    }

    /// Drop the most recently added point. No-op on an empty cage.
    /// Edge scaling is left as is.
    pub fn remove_last_point(&mut self) {
        if self.points.pop().is_some() {
            trace!("cage: removed last point, {} left", self.points.len());
        }
    }

    /// Remove every selected point and recompute edge scaling.
    pub fn remove_selected_points(&mut self) {
        let before = self.points.len();
        self.points.retain(|p| !p.selected);
        if self.points.len() != before {
            trace!(
                "cage: removed {} selected points",
                before - self.points.len()
            );
            self.recompute_scaling();
        }
    }

    /// Move a point of the original polygon. Edge scaling is left as is
    /// until the next operation that recomputes it.
    pub fn move_point(&mut self, index: usize, x: f64, y: f64) -> CageResult<()> {
        self.check_index(index)?;
        self.points[index].src = PointD::new(x, y);
        Ok(())
    }

    /// Move a point of the deformed polygon and recompute edge scaling.
    pub fn move_deformed_point(&mut self, index: usize, x: f64, y: f64) -> CageResult<()> {
        self.check_index(index)?;
        self.points[index].dest = PointD::new(x, y);
        self.recompute_scaling();
        Ok(())
    }

    /// Recompute every edge's deformed/original length ratio.
    ///
    /// A zero-length original edge yields a non-finite ratio.
    pub fn recompute_scaling(&mut self) {
        let n = self.points.len();
        for i in 0..n {
            let next = self.points[(i + 1) % n];
            let p = &mut self.points[i];
            p.edge_scaling = (p.dest - next.dest).length() / (p.src - next.src).length();
        }
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// Index of the first point of the original polygon whose handle (a
    /// square of side `handle_size` centered on it) contains (x, y).
    pub fn hit_test_original(&self, x: f64, y: f64, handle_size: i32) -> Option<usize> {
        self.hit_test(CageMode::Edit, x, y, handle_size)
    }

    /// Same as [`hit_test_original`](Self::hit_test_original) against the
    /// deformed polygon.
    pub fn hit_test_deformed(&self, x: f64, y: f64, handle_size: i32) -> Option<usize> {
        self.hit_test(CageMode::Deform, x, y, handle_size)
    }

    /// Handle hit test against the polygon selected by `mode`. The lowest
    /// index wins when handles overlap.
    pub fn hit_test(&self, mode: CageMode, x: f64, y: f64, handle_size: i32) -> Option<usize> {
        let size = handle_size as f64;
        self.points
            .iter()
            .position(|p| RectD::centered_square(p.position(mode), size).hit_test(x, y))
    }

    /// Unit perpendicular of deformed edge `edge`, obtained by swapping the
    /// edge vector's components and negating the new x. Degenerate edges
    /// give the zero vector.
    pub fn edge_normal(&self, edge: usize) -> CageResult<PointD> {
        self.check_index(edge)?;
        let n = self.points.len();
        let from = self.points[edge].dest;
        let to = self.points[(edge + 1) % n].dest;
        Ok((to - from).normal())
    }

    /// Returns `true` if (x, y) is inside the polygon selected by `mode`
    /// (even-odd rule).
    pub fn point_inside(&self, mode: CageMode, x: f64, y: f64) -> bool {
        point_in_polygon(self.points.iter().map(|p| p.position(mode)), x, y)
    }

    /// Sum over every point `i` of the orientation of the triangle
    /// `(i, i+1, i+2)` on the original polygon. Positive means the polygon
    /// winds clockwise on screen.
    pub fn signed_winding_sum(&self) -> f64 {
        let n = self.points.len();
        let mut sum = 0.0;
        for i in 0..n {
            sum += triangle_orientation(
                self.points[i].src,
                self.points[(i + 1) % n].src,
                self.points[(i + 2) % n].src,
            );
        }
        sum
    }

    // ---------------------------------------------------------------
    // Preparation for solving
    // ---------------------------------------------------------------

    /// Reverse both polygons if the original winds clockwise, then
    /// recompute the bounding box. Returns `true` if the polygons were
    /// reversed.
    pub fn normalize_winding_and_bounding_box(&mut self) -> bool {
        let reversed = self.reverse_if_needed();
        self.compute_bounding_box();
        reversed
    }

    fn reverse_if_needed(&mut self) -> bool {
        let sum = self.signed_winding_sum();
        if sum > 0.0 {
            debug!(
                "cage: reversing {} points (winding sum {sum})",
                self.points.len()
            );
            self.points.reverse();
            self.recompute_scaling();
            true
        } else {
            false
        }
    }

    fn compute_bounding_box(&mut self) {
        self.bounding_box =
            bounding_box(self.vertices(), self.bounding_box_mode).unwrap_or_default();
    }

    // ---------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------

    pub fn point_is_selected(&self, index: usize) -> bool {
        self.points.get(index).map_or(false, |p| p.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.points.iter().filter(|p| p.selected).count()
    }

    /// Select only the point at `index`.
    pub fn select_point(&mut self, index: usize) -> CageResult<()> {
        self.check_index(index)?;
        for (i, p) in self.points.iter_mut().enumerate() {
            p.selected = i == index;
        }
        Ok(())
    }

    pub fn toggle_point_selection(&mut self, index: usize) -> CageResult<()> {
        self.check_index(index)?;
        let p = &mut self.points[index];
        p.selected = !p.selected;
        Ok(())
    }

    pub fn deselect_points(&mut self) {
        for p in &mut self.points {
            p.selected = false;
        }
    }

    /// Select exactly the points of the `mode` polygon inside `area`.
    pub fn select_area(&mut self, mode: CageMode, area: RectD) {
        self.deselect_points();
        self.select_add_area(mode, area);
    }

    /// Add the points of the `mode` polygon inside `area` to the selection.
    pub fn select_add_area(&mut self, mode: CageMode, mut area: RectD) {
        area.normalize();
        for p in &mut self.points {
            let pos = p.position(mode);
            if area.hit_test(pos.x, pos.y) {
                p.selected = true;
            }
        }
    }

    // ---------------------------------------------------------------
    // Displacement of the selection
    // ---------------------------------------------------------------

    /// Displacement accumulated since the last commit or reset.
    pub fn displacement(&self) -> PointD {
        self.displacement
    }

    /// Move the selected points by (dx, dy).
    ///
    /// In [`CageMode::Edit`] both polygons move together; in
    /// [`CageMode::Deform`] only the deformed polygon moves. Either way the
    /// edge scaling is recomputed. Switching mode commits the displacement
    /// accumulated in the previous mode.
    pub fn add_displacement(&mut self, mode: CageMode, dx: f64, dy: f64) {
        if mode != self.displacement_mode {
            self.commit_displacement();
            self.displacement_mode = mode;
        }
        let delta = PointD::new(dx, dy);
        self.offset_selected(mode, delta);
        self.displacement = self.displacement + delta;
    }

    /// Keep the current positions and clear the accumulated displacement.
    pub fn commit_displacement(&mut self) {
        self.displacement = PointD::ZERO;
    }

    /// Move the selected points back by the accumulated displacement.
    pub fn reset_displacement(&mut self) {
        let back = -self.displacement;
        self.offset_selected(self.displacement_mode, back);
        self.displacement = PointD::ZERO;
    }

    fn offset_selected(&mut self, mode: CageMode, delta: PointD) {
        for p in self.points.iter_mut().filter(|p| p.selected) {
            p.dest = p.dest + delta;
            if mode == CageMode::Edit {
                p.src = p.src + delta;
            }
        }
        self.recompute_scaling();
    }
}
