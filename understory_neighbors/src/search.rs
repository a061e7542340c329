// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The search contract shared by every backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::ConfigError;

/// Per-point query used by [`SearchIndex::all_pairs`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Query {
    /// Every neighbor within the distance ([`SearchIndex::near`]).
    Radius(f64),
    /// The `k` nearest neighbors ([`SearchIndex::k_near`]).
    Nearest(usize),
}

/// A point together with its neighbors.
pub struct Neighborhood<'a, T> {
    /// The queried point.
    pub target: &'a T,
    /// Its neighbors, in the order the query produced them.
    pub neighbors: Vec<&'a T>,
}

impl<T: Debug> Debug for Neighborhood<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Neighborhood")
            .field("target", &self.target)
            .field("neighbors", &self.neighbors)
            .finish()
    }
}

/// Nearest-neighbor search over a borrowed point set.
///
/// Targets are excluded from their own results by identity (`core::ptr::eq`),
/// so a target that is not an element of [`SearchIndex::points`] is never
/// excluded, even if an element has the same value.
pub trait SearchIndex<'a, T: 'a> {
    /// Replace the point set (or keep the current one for `None`) and rebuild
    /// any acceleration structure.
    ///
    /// There is no dirty tracking: call this whenever the points change.
    fn build(&mut self, points: Option<&'a [T]>) -> Result<&mut Self, ConfigError>;

    /// The indexed point set.
    fn points(&self) -> &'a [T];

    /// Every point within `radius` of `target`, in no particular order.
    fn near(&self, target: &T, radius: f64) -> Vec<&'a T>;

    /// Up to `k` points closest to `target`, ordered by non-decreasing distance.
    fn k_near(&self, target: &T, k: usize) -> Vec<&'a T>;

    /// Run `query` for every indexed point, skipping points without neighbors.
    fn all_pairs(&self, query: Query) -> Vec<Neighborhood<'a, T>> {
        self.points()
            .iter()
            .filter_map(|target| {
                let neighbors = match query {
                    Query::Radius(d) => self.near(target, d),
                    Query::Nearest(k) => self.k_near(target, k),
                };
                (!neighbors.is_empty()).then_some(Neighborhood { target, neighbors })
            })
            .collect()
    }
}
