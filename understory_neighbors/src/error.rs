// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

/// Invalid index configuration, reported eagerly by constructors and `build`.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Cell sizes must be positive and finite.
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),
    /// A point's extracted vector does not have the dimension of the first point.
    #[error("point {index} has {found} dimensions, expected {expected}")]
    DimensionMismatch {
        /// Position of the offending point in the point set.
        index: usize,
        /// Dimension of the first point.
        expected: usize,
        /// Dimension of the offending point.
        found: usize,
    },
    /// The bounding range does not have one `[min, max]` pair per point axis.
    #[error("bounding range has {found} axes, points have {expected}")]
    BoundsDimensionMismatch {
        /// Dimension of the points.
        expected: usize,
        /// Number of axes in the bounding range.
        found: usize,
    },
    /// A bounding range axis is inverted or not finite.
    #[error("bounding range axis {axis} is invalid: [{min}, {max}]")]
    InvalidBounds {
        /// Offending axis.
        axis: usize,
        /// Lower end supplied for the axis.
        min: f64,
        /// Upper end supplied for the axis.
        max: f64,
    },
    /// The number of grid buckets does not fit in `usize`.
    #[error("grid bucket count overflows usize")]
    CapacityOverflow,
}

/// A position mapped to a grid cell outside the container.
///
/// This is a soft failure: the container is left untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("position maps outside the grid")]
pub struct OutOfBounds;
