// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float functions that are not available in `core`.

#[cfg(feature = "std")]
#[inline]
pub(crate) fn ceil(v: f64) -> f64 {
    v.ceil()
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn sqrt(v: f64) -> f64 {
    v.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn ceil(v: f64) -> f64 {
    libm::ceil(v)
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn sqrt(v: f64) -> f64 {
    libm::sqrt(v)
}
