// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brute-force backend with linear scans. Stateless across rebuilds; the reference for other backends.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::ConfigError;
use crate::search::SearchIndex;
use crate::types::{Coordinates, Identity, common_dim};

/// Brute-force nearest-neighbor search.
///
/// Every query is `O(n)`. Because it keeps no derived state, `build` only swaps
/// the point set, which makes it a good fit for tiny or constantly changing sets.
pub struct LinearIndex<'a, T, E> {
    points: &'a [T],
    extract: E,
}

impl<'a, T: Coordinates + Clone> LinearIndex<'a, T, Identity<T>> {
    /// Index a set of vectors directly.
    ///
    /// The identity extractor clones a point each time its position is read.
    /// That is free for `[f64; N]` and `kurbo` points but allocates for
    /// `Vec<f64>`; for those, [`LinearIndex::with_extractor`] with a copying
    /// extractor such as `|p: &Vec<f64>| [p[0], p[1], p[2]]` avoids it.
    pub fn new(points: &'a [T]) -> Self {
        Self::with_extractor(points, <T as Clone>::clone)
    }
}

impl<'a, T, V, E> LinearIndex<'a, T, E>
where
    E: Fn(&T) -> V,
    V: Coordinates,
{
    /// Index arbitrary objects through `extract`, which yields each object's position.
    pub fn with_extractor(points: &'a [T], extract: E) -> Self {
        Self { points, extract }
    }

    /// Position of `item` as seen by this index.
    #[inline]
    pub fn extract(&self, item: &T) -> V {
        (self.extract)(item)
    }

    /// The extractor, for reuse in another index.
    pub fn extractor(&self) -> &E {
        &self.extract
    }

    /// [`SearchIndex::near`] restricted to `candidates`.
    pub fn near_among<I>(&self, target: &T, radius: f64, candidates: I) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
    {
        let tv = self.extract(target);
        candidates
            .into_iter()
            .filter(|&p| !core::ptr::eq(p, target) && tv.distance(&self.extract(p)) <= radius)
            .collect()
    }

    /// [`SearchIndex::k_near`] restricted to `candidates`.
    ///
    /// Keeps a list of at most `k` candidates sorted by distance. A candidate
    /// enters while the list is short or when it beats the worst kept distance;
    /// it is placed after every kept entry at an equal or smaller distance, so
    /// ties keep their scan order.
    pub fn k_near_among<I>(&self, target: &T, k: usize, candidates: I) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
    {
        if k == 0 {
            return Vec::new();
        }
        let tv = self.extract(target);
        let mut kept: Vec<(f64, &'a T)> = Vec::with_capacity(k + 1);
        for p in candidates {
            if core::ptr::eq(p, target) {
                continue;
            }
            let d = tv.distance(&self.extract(p));
            let admit = match kept.last() {
                Some(&(worst, _)) => kept.len() < k || d < worst,
                None => true,
            };
            if !admit {
                continue;
            }
            let at = kept
                .iter()
                .rposition(|&(kd, _)| d >= kd)
                .map_or(0, |j| j + 1);
            kept.insert(at, (d, p));
            if kept.len() > k {
                kept.pop();
            }
        }
        kept.into_iter().map(|(_, p)| p).collect()
    }
}

impl<'a, T, V, E> SearchIndex<'a, T> for LinearIndex<'a, T, E>
where
    E: Fn(&T) -> V,
    V: Coordinates,
{
    fn build(&mut self, points: Option<&'a [T]>) -> Result<&mut Self, ConfigError> {
        let points = points.unwrap_or(self.points);
        common_dim(points, &self.extract)?;
        self.points = points;
        Ok(self)
    }

    fn points(&self) -> &'a [T] {
        self.points
    }

    fn near(&self, target: &T, radius: f64) -> Vec<&'a T> {
        self.near_among(target, radius, self.points)
    }

    fn k_near(&self, target: &T, k: usize) -> Vec<&'a T> {
        self.k_near_among(target, k, self.points)
    }
}

impl<T, E> Debug for LinearIndex<'_, T, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LinearIndex")
            .field("points", &self.points.len())
            .finish_non_exhaustive()
    }
}
