// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Neighbors: nearest-neighbor search over frequently rebuilt point sets.
//!
//! Understory Neighbors answers the two questions a simulation step asks about
//! every member of a population:
//!
//! - [`SearchIndex::near`]: every object within a radius of a target.
//! - [`SearchIndex::k_near`]: the `k` objects closest to a target, nearest first.
//!
//! Objects are borrowed, never copied. An extractor closure projects each object
//! onto its position (anything implementing [`Coordinates`], in any number of
//! dimensions), and targets are excluded from their own results by identity.
//!
//! # Example
//!
//! ```rust
//! use understory_neighbors::{LinearIndex, SearchIndex};
//!
//! let pts: Vec<[f64; 1]> = (0..=10).map(|i| [f64::from(i)]).collect();
//! let idx = LinearIndex::new(&pts);
//!
//! let near: Vec<f64> = idx.near(&pts[5], 1.0).iter().map(|p| p[0]).collect();
//! assert_eq!(near, [4.0, 6.0]);
//!
//! let nearest: Vec<f64> = idx.k_near(&pts[0], 3).iter().map(|p| p[0]).collect();
//! assert_eq!(nearest, [1.0, 2.0, 3.0]);
//! ```
//!
//! For larger sets, the grid backend hashes points into uniform cells once per
//! build and only scans the cells around each target:
//!
//! ```rust
//! use understory_neighbors::{Bounds, GridConfig, GridIndex, SearchIndex};
//!
//! struct Boid {
//!     pos: [f64; 2],
//!     perception: f64,
//! }
//!
//! let flock = vec![
//!     Boid { pos: [-50.0, 0.0], perception: 30.0 },
//!     Boid { pos: [-30.0, 10.0], perception: 30.0 },
//!     Boid { pos: [400.0, 400.0], perception: 30.0 },
//! ];
//!
//! let config = GridConfig::new(50.0)
//!     .with_bounds(Bounds::new([[-500.0, 500.0], [-500.0, 500.0]])?);
//! let mut nns = GridIndex::with_extractor(&flock, |b: &Boid| b.pos, config)?;
//! nns.build(None)?;
//!
//! let counts: Vec<usize> = flock.iter().map(|b| nns.near(b, b.perception).len()).collect();
//! assert_eq!(counts, [1, 1, 0]);
//! # Ok::<(), understory_neighbors::ConfigError>(())
//! ```
//!
//! ## Choosing a backend
//!
//! - [`LinearIndex`]: no preprocessing, `O(n)` per query. The reference behavior
//!   and the right choice for small sets.
//! - [`GridIndex`]: `O(n)` build, queries proportional to the points in nearby
//!   cells. Pick a cell size close to the typical query radius. `near` matches
//!   [`LinearIndex`] exactly for points inside the bounds; `k_near` uses an
//!   expanding-ring heuristic that can miss neighbors in sparse sets.
//!
//! ## Bounds
//!
//! The grid covers an axis-aligned [`Bounds`]. Without explicit bounds, the first
//! build computes them from the points and keeps them (see [`BoundsRefresh`]);
//! points that later leave the bounds are not indexed until the bounds are
//! refreshed. Negative coordinates are supported by translating the whole set
//! into the positive orthant, which leaves all distances unchanged.
//!
//! ## Features
//!
//! - `std` (default): float functions from `std`.
//! - `libm`: float functions from `libm` for `no_std` targets.
//! - `kurbo`: [`Coordinates`] for `kurbo::Point` and `kurbo::Vec2`.
//!
//! This crate is `no_std` and uses `alloc`. It assumes finite coordinates (no NaNs).

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("understory_neighbors requires either the `std` or `libm` feature");

pub mod backends;
pub mod config;
pub mod container;
pub mod error;
pub mod search;
pub mod types;

mod float;

pub use backends::grid::GridIndex;
pub use backends::linear::LinearIndex;
pub use config::{BoundsRefresh, GridConfig};
pub use container::GridContainer;
pub use error::{ConfigError, OutOfBounds};
pub use search::{Neighborhood, Query, SearchIndex};
pub use types::{Bounds, Coordinates, Identity, euclidean};
