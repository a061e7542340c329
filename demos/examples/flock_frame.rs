// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flocking frame loop.
//!
//! Each frame builds a grid index over the flock, asks every boid for its
//! neighbors within its perception radius, and only then moves the boids. The
//! index borrows the flock, so it lives for one frame; its configuration
//! (cell size and bounds) carries over to the next one.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_neighbors_demos --example flock_frame`

use kurbo::{Point, Vec2};
use understory_neighbors::{Bounds, ConfigError, GridConfig, GridIndex, SearchIndex};

const HALF_WORLD: f64 = 200.0;
const PERCEPTION: f64 = 30.0;
const FRAMES: usize = 5;

#[derive(Clone, Debug)]
struct Boid {
    pos: Point,
    vel: Vec2,
}

// Same xorshift as the benches, to keep the demo deterministic.
struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1u64 << 53) as f64)
    }

    fn signed(&mut self, scale: f64) -> f64 {
        (self.next_f64() - 0.5) * 2.0 * scale
    }
}

fn wrap(v: f64) -> f64 {
    let span = 2.0 * HALF_WORLD;
    (v + HALF_WORLD).rem_euclid(span) - HALF_WORLD
}

/// Steer towards the neighbors' mean heading and position.
fn steer(boid: &Boid, neighbors: &[&Boid]) -> Vec2 {
    if neighbors.is_empty() {
        return boid.vel;
    }
    let n = neighbors.len() as f64;
    let heading = neighbors.iter().fold(Vec2::ZERO, |acc, b| acc + b.vel) / n;
    let center = neighbors.iter().fold(Vec2::ZERO, |acc, b| acc + b.pos.to_vec2()) / n;
    let cohesion = center - boid.pos.to_vec2();
    boid.vel + (heading - boid.vel) * 0.125 + cohesion * 0.01
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let mut rng = Rng(0x5EED_B01D_0000_0001);
    let mut flock: Vec<Boid> = (0..400)
        .map(|_| Boid {
            pos: Point::new(rng.signed(HALF_WORLD), rng.signed(HALF_WORLD)),
            vel: Vec2::new(rng.signed(2.0), rng.signed(2.0)),
        })
        .collect();

    // The world wraps, so fixed bounds cover every boid in every frame.
    let world = Bounds::new([[-HALF_WORLD, HALF_WORLD], [-HALF_WORLD, HALF_WORLD]])?;
    let mut config = GridConfig::new(PERCEPTION).with_bounds(world);

    for frame in 0..FRAMES {
        let (velocities, crowd) = {
            let mut nns = GridIndex::with_extractor(&flock, |b: &Boid| b.pos, config.clone())?;
            nns.build(None)?;
            let mut crowd = 0;
            let velocities: Vec<Vec2> = flock
                .iter()
                .map(|boid| {
                    let neighbors = nns.near(boid, PERCEPTION);
                    crowd += neighbors.len();
                    steer(boid, &neighbors)
                })
                .collect();
            config = nns.config().clone();
            (velocities, crowd)
        };
        for (boid, vel) in flock.iter_mut().zip(velocities) {
            boid.vel = vel;
            let moved = boid.pos + vel;
            boid.pos = Point::new(wrap(moved.x), wrap(moved.y));
        }
        println!(
            "frame {frame}: mean neighbors {:.2}",
            crowd as f64 / flock.len() as f64
        );
    }

    // Every boid's closest flockmate after the last frame, through the same config.
    let mut nns = GridIndex::with_extractor(&flock, |b: &Boid| b.pos, config)?;
    nns.build(None)?;
    let loners = flock.iter().filter(|b| nns.near(b, PERCEPTION).is_empty()).count();
    let closest = nns.k_near(&flock[0], 1);
    println!("{loners} boids without neighbors; boid 0 is closest to {closest:?}");
    Ok(())
}
