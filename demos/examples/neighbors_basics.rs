// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Neighbors basics.
//!
//! Radius and k-nearest queries on a small 3D set, answered by both backends.
//! The grid answers `near` exactly like the linear scan; `k_near` may differ in
//! sparse regions.
//!
//! Run:
//! - `cargo run -p understory_neighbors_demos --example neighbors_basics`

use understory_neighbors::{ConfigError, GridIndex, LinearIndex, Query, SearchIndex};

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    // Dynamic dimension: any `Vec<f64>` works as long as all points agree.
    let pts: Vec<Vec<f64>> = vec![
        vec![0.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0],
        vec![0.0, 2.0, 0.0],
        vec![-3.0, -3.0, 1.0],
        vec![10.0, 10.0, 10.0],
    ];

    let linear = LinearIndex::new(&pts);
    let mut grid = GridIndex::new(&pts, 2.0)?;
    grid.build(None)?;

    let origin = &pts[0];
    println!("near(origin, 2.0):");
    println!("  linear -> {:?}", linear.near(origin, 2.0));
    println!("  grid   -> {:?}", grid.near(origin, 2.0));

    println!("k_near(origin, 3):");
    println!("  linear -> {:?}", linear.k_near(origin, 3));
    println!("  grid   -> {:?}", grid.k_near(origin, 3));

    // A target that is not one of the indexed objects is never excluded.
    let probe = vec![1.0, 0.0, 0.0];
    println!("near(probe, 0.0) -> {:?}", linear.near(&probe, 0.0));

    println!("all_pairs(Radius(2.5)):");
    for hood in grid.all_pairs(Query::Radius(2.5)) {
        println!("  {:?} -> {:?}", hood.target, hood.neighbors);
    }

    // Mixed dimensions are rejected at build time.
    let bad: Vec<Vec<f64>> = vec![vec![0.0, 0.0], vec![1.0]];
    if let Err(err) = GridIndex::new(&bad, 1.0)?.build(None) {
        println!("build rejected: {err}");
    }
    Ok(())
}
