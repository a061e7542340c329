// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend: approximate candidates from a grid, exact filtering by linear scan.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backends::linear::LinearIndex;
use crate::config::{BoundsRefresh, GridConfig};
use crate::container::GridContainer;
use crate::error::ConfigError;
use crate::float;
use crate::search::SearchIndex;
use crate::types::{Bounds, Coordinates, Identity};

/// Nearest-neighbor search accelerated by a uniform grid.
///
/// `build` hashes every point into a [`GridContainer`] of cubic cells covering
/// the bounding range. Before hashing, coordinates are translated by the
/// non-negative [`Bounds::shift`] so that negative coordinates map to valid
/// cells; queries are translated the same way, and since distances are
/// translation invariant the neighbor relation is unchanged.
///
/// Queries gather the buckets within a grid radius of the target's cell and
/// run [`LinearIndex`] over those candidates only:
///
/// - [`near`](SearchIndex::near) uses grid radius `ceil(radius / cell_size)`,
///   which always covers the search ball, so it returns exactly what
///   [`LinearIndex::near`](SearchIndex::near) returns for the indexed points.
/// - [`k_near`](SearchIndex::k_near) starts at the first radius that reaches the
///   grid (1 for targets inside it), grows the radius until at least `k`
///   candidates are found, then widens it twice more, never past the radius
///   that covers the whole grid. This is a heuristic: in sparse or very uneven
///   sets a closer point can sit just outside the final radius.
///
/// Points outside the bounds in effect are not indexed and are never returned.
/// The cell size trades memory against candidate count; once it reaches the size
/// of the bounding range the grid degenerates into a linear scan.
pub struct GridIndex<'a, T, E> {
    linear: LinearIndex<'a, T, E>,
    config: GridConfig,
    shift: Vec<f64>,
    grid: Option<GridContainer<usize>>,
}

impl<'a, T: Coordinates + Clone> GridIndex<'a, T, Identity<T>> {
    /// Index a set of vectors with the given cell size; bounds are computed on first build.
    ///
    /// Like [`LinearIndex::new`], this clones a point on every position read;
    /// prefer [`GridIndex::with_extractor`] for `Vec<f64>` point sets.
    pub fn new(points: &'a [T], cell_size: f64) -> Result<Self, ConfigError> {
        Self::with_extractor(points, <T as Clone>::clone, GridConfig::new(cell_size))
    }
}

impl<'a, T, V, E> GridIndex<'a, T, E>
where
    E: Fn(&T) -> V,
    V: Coordinates,
{
    /// Index arbitrary objects through `extract`.
    ///
    /// The configuration is validated here; the grid itself is created by
    /// [`SearchIndex::build`], and queries before the first build return nothing.
    pub fn with_extractor(
        points: &'a [T],
        extract: E,
        config: GridConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            linear: LinearIndex::with_extractor(points, extract),
            config,
            shift: Vec::new(),
            grid: None,
        })
    }

    /// Current configuration, including the bounds in effect.
    ///
    /// Cloning it is the way to carry cell size and bounds over to the index of
    /// the next frame.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Bounding range in effect.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.config.bounds.as_ref()
    }

    /// Replace the bounding range used by the next build. `None` recomputes it then.
    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.config.bounds = bounds;
    }

    /// Recompute the bounding range from the current points.
    ///
    /// Takes effect on the next build. An empty set clears the bounds.
    pub fn refresh_bounds(&mut self) -> Result<Option<&Bounds>, ConfigError> {
        self.config.bounds = Bounds::from_points(self.linear.points(), self.linear.extractor())?;
        log::trace!("grid bounds refreshed: {:?}", self.config.bounds);
        Ok(self.config.bounds.as_ref())
    }

    /// The grid built by the last successful build.
    pub fn grid(&self) -> Option<&GridContainer<usize>> {
        self.grid.as_ref()
    }

    /// The linear index used for exact filtering.
    pub fn linear(&self) -> &LinearIndex<'a, T, E> {
        &self.linear
    }

    /// `extract(item) + shift`, or `None` if the dimensions disagree with the grid.
    fn shifted(&self, item: &T) -> Option<Vec<f64>> {
        let v = self.linear.extract(item);
        (v.dim() == self.shift.len()).then(|| {
            self.shift
                .iter()
                .enumerate()
                .map(|(axis, s)| v.coord(axis) + s)
                .collect()
        })
    }

    fn resolve(&self, slots: &[usize]) -> impl Iterator<Item = &'a T> {
        let points = self.linear.points();
        slots.iter().filter_map(move |&slot| points.get(slot))
    }
}

impl<'a, T, V, E> SearchIndex<'a, T> for GridIndex<'a, T, E>
where
    E: Fn(&T) -> V,
    V: Coordinates,
{
    fn build(&mut self, points: Option<&'a [T]>) -> Result<&mut Self, ConfigError> {
        self.linear.build(points)?;
        self.grid = None;
        self.shift.clear();

        if self.config.bounds.is_none() || self.config.refresh == BoundsRefresh::EveryBuild {
            self.refresh_bounds()?;
        }
        let points = self.linear.points();
        let Some(bounds) = self.config.bounds.as_ref() else {
            log::debug!("grid index built over an empty point set");
            return Ok(self);
        };
        if let Some(first) = points.first() {
            let dim = self.linear.extract(first).dim();
            if dim != bounds.dim() {
                return Err(ConfigError::BoundsDimensionMismatch {
                    expected: dim,
                    found: bounds.dim(),
                });
            }
        }

        let shift = bounds.shift();
        let mut grid = GridContainer::new(self.config.cell_size, &bounds.extent())?;
        let mut position = Vec::with_capacity(shift.len());
        let mut skipped = 0_usize;
        for (slot, p) in points.iter().enumerate() {
            let v = self.linear.extract(p);
            position.clear();
            position.extend(shift.iter().enumerate().map(|(axis, s)| v.coord(axis) + s));
            if grid.insert(&position, slot).is_err() {
                skipped += 1;
            }
        }
        if skipped > 0 {
            log::debug!(
                "{skipped} of {} points lie outside the grid bounds and are not indexed",
                points.len()
            );
        }
        log::debug!(
            "grid index built: {} points, {} buckets ({:?} cells of size {})",
            grid.len(),
            grid.capacity(),
            grid.cells(),
            grid.cell_size()
        );
        self.shift = shift;
        self.grid = Some(grid);
        Ok(self)
    }

    fn points(&self) -> &'a [T] {
        self.linear.points()
    }

    fn near(&self, target: &T, radius: f64) -> Vec<&'a T> {
        let (Some(grid), Some(position)) = (self.grid.as_ref(), self.shifted(target)) else {
            return Vec::new();
        };
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "Negative radii saturate to zero; the radius is capped by the grid reach."
        )]
        let r = (float::ceil(radius / grid.cell_size()) as usize).min(grid.reach(&position));
        let slots = grid.get(&position, r);
        self.linear.near_among(target, radius, self.resolve(&slots))
    }

    fn k_near(&self, target: &T, k: usize) -> Vec<&'a T> {
        if k == 0 {
            return Vec::new();
        }
        let (Some(grid), Some(position)) = (self.grid.as_ref(), self.shifted(target)) else {
            return Vec::new();
        };
        let max_r = grid.max_radius().max(grid.reach(&position));
        let mut r = grid.gap(&position).max(1);
        let mut slots = Vec::new();
        while slots.len() < k && r <= max_r {
            slots = grid.get(&position, r);
            r += 1;
        }
        // Widen once more: candidates found in the last ring may be farther
        // than points in the ring just outside it.
        let slots = grid.get(&position, (r + 1).min(max_r));
        self.linear.k_near_among(target, k, self.resolve(&slots))
    }
}

impl<T, E> Debug for GridIndex<'_, T, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridIndex")
            .field("linear", &self.linear)
            .field("config", &self.config)
            .field("shift", &self.shift)
            .field("grid", &self.grid)
            .finish()
    }
}
