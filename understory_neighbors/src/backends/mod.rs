// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations of [`SearchIndex`](crate::SearchIndex).
//!
//! - `linear`: brute-force scans over the whole set (or a candidate subset).
//! - `grid`: uniform grid over the bounding range, refined by `linear` scans.

pub mod grid;
pub mod linear;
