//! # cage-rust
//!
//! Cage deformation coefficients for raster images.
//!
//! A cage is a closed polygon drawn around an image region. The user then
//! drags a copy of it into a new shape. This crate keeps both polygons and
//! computes, for every pixel of the cage's bounding box, the Green
//! coordinates of that pixel with respect to the original cage:
//!
//! - one **vertex coefficient** per cage point, weighting how much that
//!   point's new position pulls the pixel;
//! - one **edge coefficient** per cage edge, weighting how much that edge's
//!   rotation and stretch moves the pixel.
//!
//! A resampler combines them with the deformed points, edge normals and edge
//! scaling factors to find where each pixel lands.
//!
//! ## Usage
//!
//! ```
//! use cage_rust::{CageModel, CoefficientSolver};
//!
//! let mut cage = CageModel::new();
//! cage.add_point(0.0, 0.0);
//! cage.add_point(10.0, 0.0);
//! cage.add_point(10.0, 10.0);
//! cage.add_point(0.0, 10.0);
//! cage.move_deformed_point(2, 14.0, 12.0).unwrap();
//!
//! let field = CoefficientSolver::new().solve(&mut cage).unwrap();
//! assert_eq!((field.width(), field.height()), (10, 10));
//! let weights = field.vertex_coefs_at(5, 5).unwrap();
//! assert!((weights.iter().sum::<f32>() - 1.0).abs() < 1e-4);
//! ```
//!
//! ## Features
//!
//! - `rayon`: solve rows in parallel with
//!   [`CoefficientSolver::parallel`].

// Foundation types & math
pub mod basics;
pub mod bounding_rect;
pub mod error;
pub mod math;

// Cage
pub mod cage_coef;
pub mod cage_model;

pub use basics::{PointD, RectD};
pub use bounding_rect::{BoundingBox, BoundingBoxMode};
pub use cage_coef::{green_coefficients, CoefficientField, CoefficientSolver, MIN_CAGE_POINTS};
pub use cage_model::{CageMode, CageModel, CagePoint};
pub use error::{CageError, CageResult};
