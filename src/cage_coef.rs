//! Cage coefficients: per-pixel Green coordinates of a cage.
//!
//! For every pixel of the cage's bounding box, and every cage edge `j`
//! joining original points `v1 = p[j]` and `v2 = p[(j + 1) % n]`:
//!
//! ```text
//! a = v2 - v1          b = v1 - pixel
//! Q = a·a   S = b·b    R = 2 a·b    BA = b × a
//! SRT = sqrt(4SQ - R²)
//! L0 = ln S            L1 = ln(S + Q + R)
//! A0 = atan2(R, SRT) / SRT
//! A1 = atan2(2Q + R, SRT) / SRT
//! A10 = A1 - A0        L10 = L1 - L0
//!
//! edge[j]          = 1/(4π) ((4S - R²/Q) A10 + R/(2Q) L10 + L1 - 2)
//! vertex[j]       += BA/(2π) (L10/(2Q) - A10 (2 + R/Q))
//! vertex[(j+1)%n] -= BA/(2π) (L10/(2Q) - A10 R/Q)
//! ```
//!
//! The math runs in `f64`; each term is narrowed to `f32` as it is stored.
//! Pixels on an edge line and zero-length edges produce NaN or infinity,
//! which are kept as is.

use log::{debug, warn};

use crate::basics::{PointD, PI};
use crate::bounding_rect::BoundingBox;
use crate::cage_model::CageModel;
use crate::error::{CageError, CageResult};

/// Fewest points a cage needs to be solved.
pub const MIN_CAGE_POINTS: usize = 3;

// ============================================================================
// Kernel
// ============================================================================

/// Green coordinates of `pixel` with respect to the closed polygon `points`.
///
/// `edge_coef[j]` is assigned for every edge; `vertex_coef` is accumulated
/// into and must be zeroed by the caller. Both slices must hold
/// `points.len()` values.
pub fn green_coefficients(
    points: &[PointD],
    pixel: PointD,
    vertex_coef: &mut [f32],
    edge_coef: &mut [f32],
) {
    let n = points.len();
    debug_assert_eq!(vertex_coef.len(), n);
    debug_assert_eq!(edge_coef.len(), n);

    for j in 0..n {
        let next = (j + 1) % n;
        let v1 = points[j];
        let v2 = points[next];

        let a = v2 - v1;
        let b = v1 - pixel;
        let q = a.dot(a);
        let s = b.dot(b);
        let r = 2.0 * a.dot(b);
        let ba = b.cross(a);
        let srt = (4.0 * s * q - r * r).sqrt();
        let l0 = s.ln();
        let l1 = (s + q + r).ln();
        let a0 = r.atan2(srt) / srt;
        let a1 = (2.0 * q + r).atan2(srt) / srt;
        let a10 = a1 - a0;
        let l10 = l1 - l0;

        edge_coef[j] = (1.0 / (4.0 * PI)
            * ((4.0 * s - r * r / q) * a10 + r / (2.0 * q) * l10 + l1 - 2.0))
            as f32;

        vertex_coef[j] += (ba / (2.0 * PI) * (l10 / (2.0 * q) - a10 * (2.0 + r / q))) as f32;
        vertex_coef[next] -= (ba / (2.0 * PI) * (l10 / (2.0 * q) - a10 * (r / q))) as f32;
    }
}

/// Number of pixels in `[lo, hi)`. `hi >= lo` always holds for pixel bounds.
fn pixel_span(lo: i32, hi: i32) -> u32 {
    (i64::from(hi) - i64::from(lo)) as u32
}

fn fill_row(points: &[PointD], x0: i32, y: i32, vertex_row: &mut [f32], edge_row: &mut [f32]) {
    let n = points.len();
    for (col, (vc, ec)) in vertex_row
        .chunks_exact_mut(n)
        .zip(edge_row.chunks_exact_mut(n))
        .enumerate()
    {
        let pixel = PointD::new(x0 as f64 + col as f64, y as f64);
        green_coefficients(points, pixel, vc, ec);
    }
}

// ============================================================================
// CoefficientField
// ============================================================================

/// Vertex and edge coefficients over a cage's bounding box.
///
/// Both buffers are pixel-major, with the `n` values of one pixel stored
/// contiguously: value `k` of pixel (x, y) is at
/// `((y - origin_y) * width + (x - origin_x)) * n + k`. Indices follow the
/// cage's point order at the time of the solve.
#[derive(Debug, Clone)]
pub struct CoefficientField {
    bounding_box: BoundingBox,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    count: usize,
    vertex_coef: Vec<f32>,
    edge_coef: Vec<f32>,
}

impl CoefficientField {
    /// Top-left pixel covered.
    pub fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn vertex_count(&self) -> usize {
        self.count
    }

    pub fn edge_count(&self) -> usize {
        self.count
    }

    /// The cage bounding box the field was solved over.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Returns `true` if pixel (x, y) is covered by the field.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.pixel_offset(x, y).is_some()
    }

    fn pixel_offset(&self, x: i32, y: i32) -> Option<usize> {
        let col = x.checked_sub(self.x)?;
        let row = y.checked_sub(self.y)?;
        if col < 0 || row < 0 || col as u32 >= self.width || row as u32 >= self.height {
            return None;
        }
        Some((row as usize * self.width as usize + col as usize) * self.count)
    }

    /// All vertex coefficients of pixel (x, y).
    pub fn vertex_coefs_at(&self, x: i32, y: i32) -> Option<&[f32]> {
        let start = self.pixel_offset(x, y)?;
        Some(&self.vertex_coef[start..start + self.count])
    }

    /// All edge coefficients of pixel (x, y).
    pub fn edge_coefs_at(&self, x: i32, y: i32) -> Option<&[f32]> {
        let start = self.pixel_offset(x, y)?;
        Some(&self.edge_coef[start..start + self.count])
    }

    pub fn vertex_coef(&self, vertex: usize, x: i32, y: i32) -> Option<f32> {
        self.vertex_coefs_at(x, y)?.get(vertex).copied()
    }

    pub fn edge_coef(&self, edge: usize, x: i32, y: i32) -> Option<f32> {
        self.edge_coefs_at(x, y)?.get(edge).copied()
    }

    pub fn vertex_coef_buffer(&self) -> &[f32] {
        &self.vertex_coef
    }

    pub fn edge_coef_buffer(&self) -> &[f32] {
        &self.edge_coef
    }

    /// Number of NaN or infinite values across both buffers.
    pub fn non_finite_count(&self) -> usize {
        self.vertex_coef
            .iter()
            .chain(self.edge_coef.iter())
            .filter(|v| !v.is_finite())
            .count()
    }
}

// ============================================================================
// CoefficientSolver
// ============================================================================

/// Computes a [`CoefficientField`] for a cage.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoefficientSolver {
    parallel: bool,
}

impl CoefficientSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solve rows in parallel. Only takes effect with the `rayon` feature.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Normalize the cage's winding and bounding box, then compute the
    /// coefficients of every pixel in the box.
    ///
    /// Fails if the cage has fewer than [`MIN_CAGE_POINTS`] points, or if its
    /// bounding box does not fit the `i32` pixel grid.
    pub fn solve(&self, cage: &mut CageModel) -> CageResult<CoefficientField> {
        let count = cage.len();
        if count < MIN_CAGE_POINTS {
            return Err(CageError::TooFewVertices {
                count,
                min: MIN_CAGE_POINTS,
            });
        }

        cage.normalize_winding_and_bounding_box();
        let bounding_box = cage.bounding_box();
        let bounds = bounding_box
            .pixel_bounds()
            .ok_or(CageError::BoundsOutOfRange)?;
        let width = pixel_span(bounds.x1, bounds.x2);
        let height = pixel_span(bounds.y1, bounds.y2);
        let points: Vec<PointD> = cage.vertices().collect();

        debug!(
            "cage: solving {count} points over {width}x{height} pixels at ({}, {})",
            bounds.x1, bounds.y1
        );

        let row_len = (width as usize)
            .checked_mul(count)
            .ok_or(CageError::BoundsOutOfRange)?;
        let len = row_len
            .checked_mul(height as usize)
            .ok_or(CageError::BoundsOutOfRange)?;
        let mut vertex_coef = vec![0.0_f32; len];
        let mut edge_coef = vec![0.0_f32; len];
        if len > 0 {
            self.fill(&points, bounds.x1, bounds.y1, row_len, &mut vertex_coef, &mut edge_coef);
        }

        let field = CoefficientField {
            bounding_box,
            x: bounds.x1,
            y: bounds.y1,
            width,
            height,
            count,
            vertex_coef,
            edge_coef,
        };

        let bad = field.non_finite_count();
        if bad > 0 {
            warn!("cage: {bad} non-finite coefficients (pixels on cage edges or degenerate edges)");
        }
        Ok(field)
    }

    fn fill(
        &self,
        points: &[PointD],
        x0: i32,
        y0: i32,
        row_len: usize,
        vertex_coef: &mut [f32],
        edge_coef: &mut [f32],
    ) {
        #[cfg(feature = "rayon")]
        if self.parallel {
            use rayon::prelude::*;

            vertex_coef
                .par_chunks_mut(row_len)
                .zip(edge_coef.par_chunks_mut(row_len))
                .enumerate()
                .for_each(|(row, (vr, er))| fill_row(points, x0, y0 + row as i32, vr, er));
            return;
        }

        for (row, (vr, er)) in vertex_coef
            .chunks_mut(row_len)
            .zip(edge_coef.chunks_mut(row_len))
            .enumerate()
        {
            fill_row(points, x0, y0 + row as i32, vr, er);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
