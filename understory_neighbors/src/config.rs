// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid backend configuration.

use crate::error::ConfigError;
use crate::types::Bounds;

/// When a grid index recomputes its bounding range from the point set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BoundsRefresh {
    /// Compute once, on the first build without bounds, then keep them.
    ///
    /// Points that later drift outside the kept bounds drop out of the grid
    /// until [`GridIndex::refresh_bounds`](crate::GridIndex::refresh_bounds) is called.
    #[default]
    Once,
    /// Recompute on every build.
    ///
    /// This replaces whatever bounds are in effect, including bounds supplied
    /// through [`GridConfig::with_bounds`] or
    /// [`GridIndex::set_bounds`](crate::GridIndex::set_bounds).
    EveryBuild,
}

/// Parameters of a [`GridIndex`](crate::GridIndex).
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Side length of a grid cell. Must be positive and finite.
    pub cell_size: f64,
    /// Bounding range in effect, or `None` to compute it from the points.
    pub bounds: Option<Bounds>,
    /// When the bounds are recomputed from the points.
    pub refresh: BoundsRefresh,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 100.0,
            bounds: None,
            refresh: BoundsRefresh::Once,
        }
    }
}

impl GridConfig {
    /// Default configuration with the given cell size.
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            ..Self::default()
        }
    }

    /// Set the cell size.
    #[must_use]
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Use an explicit bounding range instead of computing one.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set the bounds recomputation policy.
    #[must_use]
    pub fn with_refresh(mut self, refresh: BoundsRefresh) -> Self {
        self.refresh = refresh;
        self
    }

    /// Check the parameters that can be checked without points.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size > 0.0 && self.cell_size.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::InvalidCellSize(self.cell_size))
        }
    }
}
