//! Error types.

/// Misuse of a cage that prevents an operation.
///
/// Numeric degeneracy inside the pixel grid is never reported here; it shows
/// up as non-finite coefficients instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CageError {
    /// A point or edge index that does not exist in the cage.
    #[error("index {index} out of range for cage with {count} points")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of points in the cage.
        count: usize,
    },
    /// The cage does not have enough points to enclose a region.
    #[error("cage needs at least {min} points, got {count}")]
    TooFewVertices {
        /// The number of points in the cage.
        count: usize,
        /// The minimum required.
        min: usize,
    },
    /// The cage bounding box does not fit the `i32` pixel grid, or one of
    /// its corners is not finite.
    #[error("cage bounding box does not fit the pixel grid")]
    BoundsOutOfRange,
}

/// Result alias for cage operations.
pub type CageResult<T> = Result<T, CageError>;
