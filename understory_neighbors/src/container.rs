// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dimension-agnostic uniform grid storage.
//!
//! A [`GridContainer`] covers the box `[0, extent[i]]` on every axis with cubic
//! cells of side `cell_size`. It stores the buckets of a virtual `D`-dimensional
//! array in one flat vector and maps a cell coordinate to its bucket with a
//! mixed-radix encoding:
//!
//! ```text
//! index(cell) = cell[0] + cells[0] * (cell[1] + cells[1] * (cell[2] + ...))
//!             = Σ stride[i] * cell[i],   stride[0] = 1, stride[i] = stride[i-1] * cells[i-1]
//! ```
//!
//! Positions map to cells with `ceil(position / cell_size)`, so a coordinate that
//! is an exact multiple of the cell size belongs to the cell *above* the boundary.
//! Each axis therefore needs `ceil(extent / cell_size) + 1` cells.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::{ConfigError, OutOfBounds};
use crate::float;

/// Uniform grid of buckets over a non-negative `D`-dimensional box.
pub struct GridContainer<V> {
    cell_size: f64,
    cells: Vec<usize>,
    strides: Vec<usize>,
    buckets: Vec<Vec<V>>,
    len: usize,
}

impl<V: Copy> GridContainer<V> {
    /// Create an empty container covering `[0, extent[i]]` on each axis.
    pub fn new(cell_size: f64, extent: &[f64]) -> Result<Self, ConfigError> {
        if !(cell_size > 0.0 && cell_size.is_finite()) {
            return Err(ConfigError::InvalidCellSize(cell_size));
        }
        let mut cells = Vec::with_capacity(extent.len());
        let mut strides = Vec::with_capacity(extent.len());
        let mut capacity = 1_usize;
        for &e in extent {
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "Extents are validated non-negative; huge values saturate and fail the checked product."
            )]
            let n = (float::ceil(e / cell_size) as usize).saturating_add(1);
            strides.push(capacity);
            cells.push(n);
            capacity = capacity
                .checked_mul(n)
                .ok_or(ConfigError::CapacityOverflow)?;
        }
        if capacity > isize::MAX as usize / size_of::<Vec<V>>() {
            return Err(ConfigError::CapacityOverflow);
        }
        let mut buckets = Vec::new();
        buckets.resize_with(capacity, Vec::new);
        Ok(Self {
            cell_size,
            cells,
            strides,
            buckets,
            len: 0,
        })
    }

    /// Map a position to its cell coordinate, `ceil(position[i] / cell_size)`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Out-of-range cells saturate and are rejected by `bucket`."
    )]
    pub fn to_grid(&self, position: &[f64]) -> Vec<i64> {
        position
            .iter()
            .map(|&c| float::ceil(c / self.cell_size) as i64)
            .collect()
    }

    /// Mixed-radix flat index of a cell coordinate.
    ///
    /// Pure arithmetic: the result may be negative or past the end for cells
    /// outside the grid. Use [`GridContainer::bucket`] for a checked lookup.
    #[allow(
        clippy::cast_possible_wrap,
        reason = "Strides are bounded by the bucket count, which fits in memory."
    )]
    pub fn index(&self, cell: &[i64]) -> i64 {
        cell.iter()
            .zip(&self.strides)
            .map(|(&c, &s)| (s as i64).saturating_mul(c))
            .fold(0_i64, i64::saturating_add)
    }

    /// Flat bucket index of a cell, if the cell lies inside the grid on every axis.
    pub fn bucket(&self, cell: &[i64]) -> Option<usize> {
        if cell.len() != self.cells.len() {
            return None;
        }
        let mut flat = 0_usize;
        for ((&c, &n), &s) in cell.iter().zip(&self.cells).zip(&self.strides) {
            let c = usize::try_from(c).ok().filter(|&c| c < n)?;
            flat += c * s;
        }
        Some(flat)
    }

    /// Every integer offset within Chebyshev radius `r` in `dim` dimensions.
    ///
    /// The Cartesian power of `[-r, ..., r]`; the first axis varies slowest.
    /// Yields `(2r + 1)^dim` offsets.
    pub fn offsets(dim: usize, r: usize) -> Vec<Vec<i64>> {
        #[allow(
            clippy::cast_possible_wrap,
            reason = "Grid radii are bounded by per-axis cell counts."
        )]
        let r = r as i64;
        let base: Vec<i64> = (-r..=r).collect();
        let mut out: Vec<Vec<i64>> = alloc::vec![Vec::with_capacity(dim)];
        for _ in 0..dim {
            let mut next = Vec::with_capacity(out.len() * base.len());
            for prefix in &out {
                for &b in &base {
                    let mut v = prefix.clone();
                    v.push(b);
                    next.push(v);
                }
            }
            out = next;
        }
        out
    }

    /// Smallest grid radius around the cell covering `position` that reaches every cell.
    pub fn reach(&self, position: &[f64]) -> usize {
        self.to_grid(position)
            .iter()
            .zip(&self.cells)
            .map(|(&o, &n)| {
                let last = i64::try_from(n).unwrap_or(i64::MAX) - 1;
                let r = o.abs_diff(0).max(o.abs_diff(last));
                usize::try_from(r).unwrap_or(usize::MAX)
            })
            .max()
            .unwrap_or(0)
    }

    /// Store `value` in the bucket covering `position`.
    ///
    /// Returns the flat bucket index. A position outside the grid is rejected
    /// with [`OutOfBounds`] and leaves the container unchanged.
    pub fn insert(&mut self, position: &[f64], value: V) -> Result<usize, OutOfBounds> {
        let cell = self.to_grid(position);
        let flat = self.bucket(&cell).ok_or(OutOfBounds)?;
        self.buckets[flat].push(value);
        self.len += 1;
        Ok(flat)
    }

    /// Smallest grid radius whose window around `position` touches the grid.
    ///
    /// Zero for positions inside the grid.
    pub fn gap(&self, position: &[f64]) -> usize {
        self.to_grid(position)
            .iter()
            .zip(&self.cells)
            .map(|(&o, &n)| {
                let last = i64::try_from(n).unwrap_or(i64::MAX) - 1;
                let g = if o < 0 {
                    o.unsigned_abs()
                } else {
                    o.abs_diff(o.min(last))
                };
                usize::try_from(g).unwrap_or(usize::MAX)
            })
            .max()
            .unwrap_or(0)
    }

    /// Values stored within grid radius `r` of the cell covering `position`.
    ///
    /// `r == 0` reads the single bucket. Otherwise the window of cells at
    /// Chebyshev distance `r` or less is clipped to the grid on every axis, and
    /// each bucket inside it is visited once, the last axis varying fastest.
    /// The cost is bounded by the clipped window, not by `(2r + 1)^dim`.
    pub fn get(&self, position: &[f64], r: usize) -> Vec<V> {
        let origin = self.to_grid(position);
        if origin.len() != self.cells.len() {
            return Vec::new();
        }
        let r = i64::try_from(r).unwrap_or(i64::MAX);
        let mut lo = Vec::with_capacity(origin.len());
        let mut hi = Vec::with_capacity(origin.len());
        for (&o, &n) in origin.iter().zip(&self.cells) {
            let last = i64::try_from(n).unwrap_or(i64::MAX) - 1;
            let a = o.saturating_sub(r).max(0);
            let b = o.saturating_add(r).min(last);
            let (Ok(a), Ok(b)) = (usize::try_from(a), usize::try_from(b)) else {
                return Vec::new();
            };
            if a > b {
                return Vec::new();
            }
            lo.push(a);
            hi.push(b);
        }

        let mut out = Vec::new();
        let mut cell = lo.clone();
        loop {
            let flat: usize = cell.iter().zip(&self.strides).map(|(c, s)| c * s).sum();
            out.extend_from_slice(&self.buckets[flat]);
            let mut axis = cell.len();
            loop {
                if axis == 0 {
                    return out;
                }
                axis -= 1;
                if cell[axis] < hi[axis] {
                    cell[axis] += 1;
                    break;
                }
                cell[axis] = lo[axis];
            }
        }
    }
}

impl<V> GridContainer<V> {
    /// Side length of a cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of cells along each axis.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Total number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Largest per-axis cell count; no grid radius beyond it reaches new cells.
    pub fn max_radius(&self) -> usize {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no value has been stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<V> Debug for GridContainer<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let occupied = self.buckets.iter().filter(|b| !b.is_empty()).count();
        f.debug_struct("GridContainer")
            .field("cell_size", &self.cell_size)
            .field("cells", &self.cells)
            .field("capacity", &self.buckets.len())
            .field("occupied", &occupied)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
