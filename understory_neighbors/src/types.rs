// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate abstraction and bounding ranges.

use alloc::vec::Vec;

use crate::error::ConfigError;
use crate::float;

/// A point-like value with a fixed number of real-valued axes.
///
/// This is the only view the indexes have of positions. `distance` defaults to
/// the Euclidean metric; override it to search under another metric. The grid
/// backend stays exact for `near` as long as the metric never reports a
/// distance shorter than the largest per-axis difference (Euclidean,
/// Manhattan, and Chebyshev all qualify).
pub trait Coordinates {
    /// Number of axes.
    fn dim(&self) -> usize;

    /// Coordinate on `axis`. Callers keep `axis < self.dim()`.
    fn coord(&self, axis: usize) -> f64;

    /// Distance to `other`, which has the same dimension.
    fn distance(&self, other: &Self) -> f64 {
        euclidean(self, other)
    }
}

/// Euclidean distance between two values of equal dimension.
pub fn euclidean<V: Coordinates + ?Sized>(a: &V, b: &V) -> f64 {
    debug_assert_eq!(a.dim(), b.dim(), "distance between mismatched dimensions");
    let mut sum = 0.0;
    for axis in 0..a.dim() {
        let d = a.coord(axis) - b.coord(axis);
        sum += d * d;
    }
    float::sqrt(sum)
}

/// Identity extractor: the point set elements are already vectors.
pub type Identity<T> = fn(&T) -> T;

impl Coordinates for f64 {
    #[inline]
    fn dim(&self) -> usize {
        1
    }

    #[inline]
    fn coord(&self, _axis: usize) -> f64 {
        *self
    }

    #[inline]
    fn distance(&self, other: &Self) -> f64 {
        let d = self - other;
        if d < 0.0 { -d } else { d }
    }
}

impl<const N: usize> Coordinates for [f64; N] {
    #[inline]
    fn dim(&self) -> usize {
        N
    }

    #[inline]
    fn coord(&self, axis: usize) -> f64 {
        self[axis]
    }
}

impl Coordinates for Vec<f64> {
    #[inline]
    fn dim(&self) -> usize {
        self.len()
    }

    #[inline]
    fn coord(&self, axis: usize) -> f64 {
        self[axis]
    }
}

#[cfg(feature = "kurbo")]
impl Coordinates for kurbo::Point {
    #[inline]
    fn dim(&self) -> usize {
        2
    }

    #[inline]
    fn coord(&self, axis: usize) -> f64 {
        if axis == 0 { self.x } else { self.y }
    }
}

#[cfg(feature = "kurbo")]
impl Coordinates for kurbo::Vec2 {
    #[inline]
    fn dim(&self) -> usize {
        2
    }

    #[inline]
    fn coord(&self, axis: usize) -> f64 {
        if axis == 0 { self.x } else { self.y }
    }
}

/// Shared dimension of every extracted vector, or `None` for an empty set.
pub(crate) fn common_dim<T, V, E>(points: &[T], extract: &E) -> Result<Option<usize>, ConfigError>
where
    E: Fn(&T) -> V,
    V: Coordinates,
{
    let Some(first) = points.first() else {
        return Ok(None);
    };
    let expected = extract(first).dim();
    for (index, p) in points.iter().enumerate().skip(1) {
        let found = extract(p).dim();
        if found != expected {
            return Err(ConfigError::DimensionMismatch {
                index,
                expected,
                found,
            });
        }
    }
    Ok(Some(expected))
}

/// Axis-aligned bounding range: one `[min, max]` pair per axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
    ranges: Vec<[f64; 2]>,
}

impl Bounds {
    /// Create bounds from per-axis `[min, max]` pairs.
    ///
    /// Every pair must be finite with `min <= max`.
    pub fn new(ranges: impl Into<Vec<[f64; 2]>>) -> Result<Self, ConfigError> {
        let ranges = ranges.into();
        for (axis, &[min, max]) in ranges.iter().enumerate() {
            if !(min.is_finite() && max.is_finite() && min <= max) {
                return Err(ConfigError::InvalidBounds { axis, min, max });
            }
        }
        Ok(Self { ranges })
    }

    /// Compute the bounding range of the extracted vectors of `points`.
    ///
    /// Returns `Ok(None)` for an empty set.
    pub fn from_points<T, V, E>(points: &[T], extract: E) -> Result<Option<Self>, ConfigError>
    where
        E: Fn(&T) -> V,
        V: Coordinates,
    {
        let Some(dim) = common_dim(points, &extract)? else {
            return Ok(None);
        };
        let mut ranges = alloc::vec![[f64::INFINITY, f64::NEG_INFINITY]; dim];
        for p in points {
            let v = extract(p);
            for (axis, range) in ranges.iter_mut().enumerate() {
                let c = v.coord(axis);
                if c < range[0] {
                    range[0] = c;
                }
                if c > range[1] {
                    range[1] = c;
                }
            }
        }
        Self::new(ranges).map(Some)
    }

    /// Number of axes.
    pub fn dim(&self) -> usize {
        self.ranges.len()
    }

    /// The per-axis `[min, max]` pairs.
    pub fn ranges(&self) -> &[[f64; 2]] {
        &self.ranges
    }

    /// Non-negative translation that moves the range into the positive orthant:
    /// `-min` on axes with a negative minimum, `0` elsewhere.
    pub fn shift(&self) -> Vec<f64> {
        self.ranges
            .iter()
            .map(|&[min, _]| if min < 0.0 { -min } else { 0.0 })
            .collect()
    }

    /// Per-axis extent of the shifted range measured from the origin, `max + shift`.
    ///
    /// Equals `max - min` whenever the minimum is negative.
    pub fn extent(&self) -> Vec<f64> {
        self.ranges
            .iter()
            .map(|&[min, max]| if min < 0.0 { max - min } else { max })
            .collect()
    }

    /// Whether `v` lies inside the range on every axis.
    pub fn contains<V: Coordinates + ?Sized>(&self, v: &V) -> bool {
        v.dim() == self.dim()
            && self
                .ranges
                .iter()
                .enumerate()
                .all(|(axis, &[min, max])| (min..=max).contains(&v.coord(axis)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn euclidean_matches_pythagoras() {
        assert_eq!([0.0_f64, 0.0].distance(&[3.0, 4.0]), 5.0);
        assert_eq!(vec![1.0_f64, 1.0, 1.0].distance(&vec![1.0, 1.0, 3.0]), 2.0);
        assert_eq!(2.5_f64.distance(&-1.5), 4.0);
    }

    #[test]
    fn bounds_from_points_scans_each_axis() {
        let pts = [[-3.0_f64, 2.0], [5.0, -1.0], [0.0, 7.0]];
        let b = Bounds::from_points(&pts, |p: &[f64; 2]| *p).unwrap().unwrap();
        assert_eq!(b.ranges(), &[[-3.0, 5.0], [-1.0, 7.0]]);
        assert_eq!(b.shift(), vec![3.0, 1.0]);
        assert_eq!(b.extent(), vec![8.0, 8.0]);
    }

    #[test]
    fn bounds_from_empty_set_is_none() {
        let pts: [[f64; 2]; 0] = [];
        assert_eq!(Bounds::from_points(&pts, |p: &[f64; 2]| *p), Ok(None));
    }

    #[test]
    fn bounds_reject_mixed_dimensions() {
        let pts = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0]];
        let err = Bounds::from_points(&pts, |p: &Vec<f64>| p.clone()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DimensionMismatch {
                index: 2,
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn bounds_reject_inverted_axis() {
        let err = Bounds::new(vec![[0.0, 10.0], [5.0, -5.0]]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBounds {
                axis: 1,
                min: 5.0,
                max: -5.0,
            }
        );
        assert!(Bounds::new(vec![[f64::NAN, 1.0]]).is_err());
    }

    #[test]
    fn positive_minimum_extends_extent_to_origin() {
        let b = Bounds::new(vec![[500.0, 600.0]]).unwrap();
        assert_eq!(b.shift(), vec![0.0]);
        assert_eq!(b.extent(), vec![600.0]);
        assert!(b.contains(&550.0_f64));
        assert!(!b.contains(&650.0_f64));
    }
}
